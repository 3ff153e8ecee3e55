use arbitrary::Arbitrary;
use compact_variant::Variant;

mod actions;
mod alternatives;

pub use actions::{
    Action,
    Foreign,
};
pub use alternatives::{
    Fragile,
    Volatile,
};

/// The set of alternatives every slot is a variant over
pub type Set = (u32, String, Fragile, Volatile);
/// A single [`Variant`] under test
pub type Slot = Variant<Set>;

/// Most slots we'll run a scenario with
const MAX_SLOTS: usize = 8;

/// A framework to generate a pool of [`Variant`]s and a "control" model of what each one should
/// hold, then run a series of actions against both and assert they agree.
///
/// Used for fuzz testing
#[derive(Arbitrary, Debug)]
pub struct Scenario {
    pub initial: Vec<Value>,
    pub actions: Vec<Action>,
}

impl Scenario {
    /// Run the provided scenario, asserting for correct behavior
    pub fn run(self) {
        let mut control: Vec<Option<Value>> = self
            .initial
            .into_iter()
            .take(MAX_SLOTS)
            .map(Some)
            .collect();
        if control.is_empty() {
            return;
        }

        let mut slots: Vec<Slot> = control
            .iter()
            .flatten()
            .cloned()
            .map(Value::into_variant)
            .collect();
        assert_agree(&slots, &control);

        for action in self.actions {
            action.perform(&mut slots, &mut control);
            assert_agree(&slots, &control);
        }
    }
}

/// A plain model of one alternative's value
#[derive(Arbitrary, Debug, Clone, PartialEq)]
pub enum Value {
    Int(u32),
    Text(String),
    Fragile(Fragile),
    Volatile(Volatile),
}

impl Value {
    pub fn index(&self) -> usize {
        match self {
            Value::Int(_) => 0,
            Value::Text(_) => 1,
            Value::Fragile(_) => 2,
            Value::Volatile(_) => 3,
        }
    }

    pub fn into_variant(self) -> Slot {
        match self {
            Value::Int(x) => Variant::new(x),
            Value::Text(s) => Variant::new(s),
            Value::Fragile(f) => Variant::new(f),
            Value::Volatile(v) => Variant::new(v),
        }
    }

    pub fn from_variant(slot: &Slot) -> Option<Value> {
        match slot.index() {
            0 => slot.get_if::<0>().map(|x| Value::Int(*x)),
            1 => slot.get_if::<1>().cloned().map(Value::Text),
            2 => slot.get_if::<2>().cloned().map(Value::Fragile),
            3 => slot.get_if::<3>().cloned().map(Value::Volatile),
            _ => None,
        }
    }

    /// What a successful copy produces, `None` if the copy fails
    fn copy(&self) -> Option<Value> {
        match self {
            Value::Int(x) => Some(Value::Int(*x)),
            Value::Text(s) => Some(Value::Text(s.clone())),
            Value::Fragile(f) if !f.poisoned => Some(Value::Fragile(Fragile {
                id: f.id,
                poisoned: false,
            })),
            Value::Volatile(v) if !v.poisoned => Some(Value::Volatile(Volatile {
                id: v.id,
                poisoned: false,
            })),
            Value::Fragile(_) | Value::Volatile(_) => None,
        }
    }

    fn relocates(&self) -> bool {
        !matches!(self, Value::Volatile(v) if v.poisoned)
    }

    fn staged(&self) -> bool {
        matches!(self, Value::Fragile(_))
    }
}

/// Models copying `src` over `dst`, returns if the copy succeeded
pub(crate) fn copy_assign(dst: &mut Option<Value>, src: &Value) -> bool {
    let same = dst.as_ref().map(Value::index) == Some(src.index());
    match src.copy() {
        Some(copy) => {
            *dst = Some(copy);
            true
        }
        None => {
            if !same && !src.staged() {
                *dst = None;
            }
            false
        }
    }
}

/// Models moving `src` over `dst`, returns if the move succeeded
pub(crate) fn move_assign(dst: &mut Option<Value>, src: Value) -> bool {
    let same = dst.as_ref().map(Value::index) == Some(src.index());
    if same {
        // only a volatile move assignment can fail, which leaves us as we were
        if let Value::Volatile(v) = &src {
            if v.poisoned {
                return false;
            }
        }
        *dst = Some(src);
        return true;
    }

    if src.relocates() {
        *dst = Some(src);
        true
    } else {
        *dst = None;
        false
    }
}

/// Asserts every slot holds exactly what our control says it should
fn assert_agree(slots: &[Slot], control: &[Option<Value>]) {
    assert_eq!(slots.len(), control.len());
    for (slot, expected) in slots.iter().zip(control) {
        assert_eq!(slot.is_valueless(), expected.is_none());
        assert_eq!(slot.is_valueless(), slot.index() == compact_variant::NPOS);
        assert_eq!(&Value::from_variant(slot), expected);

        if let Some(value) = expected {
            assert_eq!(slot.index(), value.index());
            assert_eq!(slot, &value.clone().into_variant());
        }
    }
}
