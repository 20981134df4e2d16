//! # Message passing
//!
//! Storage for the four directional message tables and the min-sum update which fills them.
//!
//! Messages are stored at the pixel which *receives* them, named after the side they arrive
//! from. A message sent upwards from `(x, y)` therefore lands in `from_below` at `(x, y - 1)`.
//!
//! One iteration is four sweeps in a fixed order: right, left, down, up. Each sweep walks every
//! row (or column) in its direction and overwrites messages in place, so later sends see values
//! written earlier in the same sweep and by the sweeps before it. Rows (or columns) are
//! independent of each other within a sweep and may be processed in parallel, the cells along
//! the sweep direction may not.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis, Zip};

use crate::cost::CostModel;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Incoming messages of every pixel, each table indexed `[y, x, label]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageStore {
    pub(crate) from_above: Array3<u32>,
    pub(crate) from_below: Array3<u32>,
    pub(crate) from_left: Array3<u32>,
    pub(crate) from_right: Array3<u32>
}

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// The neighbour a message was received from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
    Left,
    Right
}

/// Direction a sweep sends messages in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    Right,
    Left,
    Down,
    Up
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    Forward,
    Backward
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Compute a min-sum message into `out`.
///
/// For every receiver label `i`, `out[i]` is the minimum over sender labels `j` of the sender's
/// evidence, the smoothness cost between `i` and `j` and the sender's three other incoming
/// messages. The result is then shifted so its smallest entry is zero.
pub fn update_message(
    evidence: ArrayView1<u32>,
    smoothness: &Array2<u32>,
    in_a: ArrayView1<u32>,
    in_b: ArrayView1<u32>,
    in_c: ArrayView1<u32>,
    out: ArrayViewMut1<u32>
) {
    let mut sender = Array1::zeros(evidence.len());
    update_message_into(evidence, smoothness, in_a, in_b, in_c, &mut sender, out);
}

/// As `update_message`, but reusing `sender` to hold the sender's per label cost.
fn update_message_into(
    evidence: ArrayView1<u32>,
    smoothness: &Array2<u32>,
    in_a: ArrayView1<u32>,
    in_b: ArrayView1<u32>,
    in_c: ArrayView1<u32>,
    sender: &mut Array1<u32>,
    mut out: ArrayViewMut1<u32>
) {
    let levels = out.len();
    assert_eq!(evidence.len(), levels);
    assert_eq!(sender.len(), levels);
    assert_eq!(smoothness.dim(), (levels, levels));

    // Sender cost per label, independent of the receiver label
    Zip::from(&mut *sender)
        .and(&evidence)
        .and(&in_a)
        .and(&in_b)
        .and(&in_c)
        .for_each(|h, &e, &a, &b, &c| *h = e + a + b + c);

    for (i, o) in out.iter_mut().enumerate() {
        *o = sender
            .iter()
            .zip(smoothness.row(i))
            .map(|(&hj, &s)| hj + s)
            .min()
            .unwrap_or(0);
    }

    let min = out.iter().copied().min().unwrap_or(0);
    out.mapv_inplace(|v| v - min);
}

/// Run one sweep over the whole grid, updating `messages` in place.
pub fn sweep(costs: &CostModel, messages: &mut MessageStore, direction: Sweep) {
    let MessageStore { from_above, from_below, from_left, from_right } = messages;

    // Rows are lanes of axis 0, columns are lanes of axis 1
    let (axis, side_a, side_b, carried, order) = match direction {
        Sweep::Right => (Axis(0), &*from_above, &*from_below, from_left, Order::Forward),
        Sweep::Left => (Axis(0), &*from_above, &*from_below, from_right, Order::Backward),
        Sweep::Down => (Axis(1), &*from_left, &*from_right, from_above, Order::Forward),
        Sweep::Up => (Axis(1), &*from_left, &*from_right, from_below, Order::Backward)
    };

    let smoothness = costs.smoothness_table();

    let lanes = Zip::from(costs.data_table().axis_iter(axis))
        .and(side_a.axis_iter(axis))
        .and(side_b.axis_iter(axis))
        .and(carried.axis_iter_mut(axis));

    #[cfg(feature = "parallel")]
    lanes.par_for_each(|evidence, a, b, c| sweep_lane(evidence, a, b, c, smoothness, order));

    #[cfg(not(feature = "parallel"))]
    lanes.for_each(|evidence, a, b, c| sweep_lane(evidence, a, b, c, smoothness, order));

    log::trace!("{:?} sweep complete", direction);
}

/// Pass messages along a single row or column.
///
/// All views are indexed `[position, label]`. `carried` is both read at the sender and written
/// at the receiver, which is what makes the sweep sequential along the lane.
fn sweep_lane(
    evidence: ArrayView2<u32>,
    side_a: ArrayView2<u32>,
    side_b: ArrayView2<u32>,
    mut carried: ArrayViewMut2<u32>,
    smoothness: &Array2<u32>,
    order: Order
) {
    let len = evidence.nrows();
    let mut sender = Array1::zeros(evidence.ncols());
    let mut scratch = Array1::zeros(evidence.ncols());

    let mut send = |from: usize, to: usize, carried: &mut ArrayViewMut2<u32>| {
        update_message_into(
            evidence.row(from),
            smoothness,
            side_a.row(from),
            side_b.row(from),
            carried.row(from),
            &mut sender,
            scratch.view_mut()
        );
        carried.row_mut(to).assign(&scratch);
    };

    match order {
        Order::Forward => {
            for i in 0..len.saturating_sub(1) {
                send(i, i + 1, &mut carried);
            }
        },
        Order::Backward => {
            for i in (1..len).rev() {
                send(i, i - 1, &mut carried);
            }
        }
    }
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Sweep {
    /// The order sweeps are run in within one iteration.
    pub const ORDER: [Sweep; 4] = [Sweep::Right, Sweep::Left, Sweep::Down, Sweep::Up];

    /// The side of the receiving pixel that this sweep's messages arrive from.
    pub fn receiving_side(self) -> Side {
        match self {
            Sweep::Right => Side::Left,
            Sweep::Left => Side::Right,
            Sweep::Down => Side::Above,
            Sweep::Up => Side::Below
        }
    }
}

impl MessageStore {
    /// Create a store with every message set to zero.
    pub fn new(width: usize, height: usize, levels: usize) -> Self {
        let shape = (height, width, levels);

        Self {
            from_above: Array3::zeros(shape),
            from_below: Array3::zeros(shape),
            from_left: Array3::zeros(shape),
            from_right: Array3::zeros(shape)
        }
    }

    /// The full table of messages received from the given side.
    pub fn table(&self, side: Side) -> &Array3<u32> {
        match side {
            Side::Above => &self.from_above,
            Side::Below => &self.from_below,
            Side::Left => &self.from_left,
            Side::Right => &self.from_right
        }
    }

    /// The message received at `(x, y)` from the given side.
    pub fn incoming(&self, side: Side, x: usize, y: usize) -> ArrayView1<'_, u32> {
        self.table(side).slice(ndarray::s![y, x, ..])
    }

    /// True if no message has moved away from its initial value.
    pub fn is_zero(&self) -> bool {
        [Side::Above, Side::Below, Side::Left, Side::Right]
            .iter()
            .all(|&s| self.table(s).iter().all(|&v| v == 0))
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
