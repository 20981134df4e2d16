//! # Sweep schedule
//!
//! Checks the solver against a plain nested-vector implementation of the same sequential sweep
//! schedule, iteration by iteration.

mod common;

use common::*;
use lbp_disparity::prelude::*;

type Table = Vec<Vec<Vec<u32>>>;

struct Plain {
    data: Table,
    smooth: Vec<Vec<u32>>,
    above: Table,
    below: Table,
    left: Table,
    right: Table,
    width: usize,
    height: usize,
    levels: usize
}

fn message(p: &Plain, data: &[u32], a: &[u32], b: &[u32], c: &[u32]) -> Vec<u32> {
    let mut out: Vec<u32> = (0..p.levels)
        .map(|i| {
            (0..p.levels)
                .map(|j| data[j] + p.smooth[i][j] + a[j] + b[j] + c[j])
                .min()
                .unwrap()
        })
        .collect();
    let min = *out.iter().min().unwrap();
    out.iter_mut().for_each(|v| *v -= min);
    out
}

impl Plain {
    fn new(pair: &StereoPair, params: &Params) -> Self {
        let (width, height, levels) = (pair.width() as usize, pair.height() as usize, params.levels);
        let mut data: Table = vec![vec![vec![0; levels]; width]; height];

        for y in 0..height {
            for x in 0..width {
                for l in 0..levels {
                    let lp = pair.left().get_pixel(x as u32, y as u32)[0] as i32;
                    let rp = if x >= l {
                        pair.right().get_pixel((x - l) as u32, y as u32)[0] as i32
                    }
                    else {
                        0
                    };
                    data[y][x][l] = (lp - rp).abs() as u32;
                }
            }
        }

        let smooth: Vec<Vec<u32>> = (0..levels)
            .map(|i| (0..levels)
                .map(|j| params.smooth_weight * ((i as i64 - j as i64).abs().min(params.smooth_cap as i64) as u32))
                .collect())
            .collect();

        let zero: Table = vec![vec![vec![0; levels]; width]; height];

        Plain {
            data,
            smooth,
            above: zero.clone(),
            below: zero.clone(),
            left: zero.clone(),
            right: zero,
            width,
            height,
            levels
        }
    }

    fn iterate(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width - 1 {
                let msg = message(self, &self.data[y][x], &self.above[y][x], &self.below[y][x], &self.left[y][x]);
                self.left[y][x + 1] = msg;
            }
        }
        for y in 0..self.height {
            for x in (1..self.width).rev() {
                let msg = message(self, &self.data[y][x], &self.above[y][x], &self.below[y][x], &self.right[y][x]);
                self.right[y][x - 1] = msg;
            }
        }
        for x in 0..self.width {
            for y in 0..self.height - 1 {
                let msg = message(self, &self.data[y][x], &self.above[y][x], &self.left[y][x], &self.right[y][x]);
                self.above[y + 1][x] = msg;
            }
        }
        for x in 0..self.width {
            for y in (1..self.height).rev() {
                let msg = message(self, &self.data[y][x], &self.below[y][x], &self.left[y][x], &self.right[y][x]);
                self.below[y - 1][x] = msg;
            }
        }
    }

    fn labels(&self) -> Vec<Vec<usize>> {
        (0..self.height)
            .map(|y| (0..self.width)
                .map(|x| {
                    let mut best = 0;
                    let mut min = u32::MAX;
                    for l in 0..self.levels {
                        let b = self.data[y][x][l] + self.above[y][x][l] + self.below[y][x][l]
                            + self.left[y][x][l] + self.right[y][x][l];
                        if b < min {
                            min = b;
                            best = l;
                        }
                    }
                    best
                })
                .collect())
            .collect()
    }

    fn energy(&self, labels: &[Vec<usize>]) -> u64 {
        let mut e = 0u64;
        for y in 0..self.height {
            for x in 0..self.width {
                let l = labels[y][x];
                e += self.data[y][x][l] as u64;
                if x + 1 < self.width {
                    e += self.smooth[l][labels[y][x + 1]] as u64;
                }
                if y + 1 < self.height {
                    e += self.smooth[l][labels[y + 1][x]] as u64;
                }
            }
        }
        e
    }
}

fn check_against_plain(width: u32, height: u32, params: Params, seed: u64) {
    let pair = StereoPair::new(noise(width, height, seed), noise(width, height, seed + 100)).unwrap();

    let mut plain = Plain::new(&pair, &params);
    let mut engine = Engine::new(&pair, &params).unwrap();

    for _ in 0..params.iterations {
        plain.iterate();
        let expected = plain.labels();

        let it = engine.step();
        let map = engine.disparity();

        for y in 0..height as usize {
            for x in 0..width as usize {
                assert_eq!(map.get(x, y), expected[y][x], "label mismatch at ({}, {}) in iteration {}", x, y, it.index);
            }
        }
        assert_eq!(it.energy, plain.energy(&expected), "energy mismatch in iteration {}", it.index);
    }
}

#[test]
fn matches_plain_schedule_on_noise() {
    check_against_plain(9, 7, params(5, 4, 3, 2), 21);
}

#[test]
fn matches_plain_schedule_on_a_single_row() {
    check_against_plain(11, 1, params(4, 3, 5, 2), 5);
}

#[test]
fn matches_plain_schedule_on_a_single_column() {
    check_against_plain(1, 8, params(3, 3, 2, 1), 9);
}

#[test]
fn matches_plain_schedule_with_one_level() {
    check_against_plain(5, 4, params(1, 2, 5, 2), 2);
}
