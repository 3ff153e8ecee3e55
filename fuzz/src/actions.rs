//! Various actions we take on a pool of [`Variant`]s and their "control" model, asserting
//! invariants along the way.

use arbitrary::Arbitrary;
use compact_variant::{
    Error,
    LifetimeError,
    Variant,
};

use crate::{
    copy_assign,
    move_assign,
    Slot,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Action {
    /// Discard whatever a slot holds and store a new value
    Emplace(u8, Value),
    /// Move a value into a slot
    Set(u8, Value),
    /// Copy a value into a slot
    SetFrom(u8, Value),
    /// Copy one slot over another
    Assign(u8, u8),
    /// Move one slot over another, leaving the source valueless
    Move(u8, u8),
    /// Take the value out of a slot
    Take(u8),
    /// Swap the contents of two slots
    Swap(u8, u8),
    /// Overwrite a slot with a variant generated by `compact_variant` itself
    Replace(u8, Slot),
    /// Copy in the value of a variant over a different set of alternatives
    AssignAcross(u8, Foreign),
    /// Clone a slot and check the copy
    TryClone(u8),
    /// Check two slots compare the same way their models do
    Compare(u8, u8),
}

/// A value held by a variant over `(f64, u32)`, only the `u32` can be assigned into a [`Slot`]
#[derive(Arbitrary, Debug)]
pub enum Foreign {
    Float(f64),
    Int(u32),
}

impl Action {
    pub fn perform(self, slots: &mut [Slot], control: &mut [Option<Value>]) {
        use Action::*;

        let len = slots.len();
        let pick = move |i: u8| usize::from(i) % len;

        match self {
            Emplace(i, value) => {
                let i = pick(i);
                emplace(&mut slots[i], value.clone());
                control[i] = Some(value);
            }
            Set(i, value) => {
                let i = pick(i);
                let result = set(&mut slots[i], value.clone());
                let ok = move_assign(&mut control[i], value);
                assert_eq!(result.is_ok(), ok, "{result:?}");
            }
            SetFrom(i, value) => {
                let i = pick(i);
                let result = set_from(&mut slots[i], &value);
                let ok = copy_assign(&mut control[i], &value);
                assert_eq!(result.is_ok(), ok, "{result:?}");
            }
            Assign(src, dst) => {
                let (src, dst) = (pick(src), pick(dst));
                let result = Variant::assign_within(slots, src, dst);

                let ok = match (src == dst, control[src].clone()) {
                    (true, _) => true,
                    (false, None) => {
                        control[dst] = None;
                        true
                    }
                    (false, Some(value)) => copy_assign(&mut control[dst], &value),
                };
                assert_eq!(result.is_ok(), ok, "{result:?}");
            }
            Move(src, dst) => {
                let (src, dst) = (pick(src), pick(dst));
                let result = Variant::move_within(slots, src, dst);

                let ok = if src == dst {
                    true
                } else {
                    match control[src].take() {
                        None => {
                            control[dst] = None;
                            true
                        }
                        Some(value) => move_assign(&mut control[dst], value),
                    }
                };
                assert_eq!(result.is_ok(), ok, "{result:?}");
            }
            Take(i) => {
                let i = pick(i);
                let taken = slots[i].take();
                assert_eq!(Value::from_variant(&taken), control[i].take());
                assert!(slots[i].is_valueless());
            }
            Swap(a, b) => {
                let (a, b) = (pick(a), pick(b));
                if a == b {
                    return;
                }
                let (low, high) = (a.min(b), a.max(b));
                let (head, tail) = slots.split_at_mut(high);
                head[low].swap(&mut tail[0]);
                control.swap(a, b);
            }
            Replace(i, variant) => {
                let i = pick(i);
                assert!(!variant.is_valueless());
                control[i] = Value::from_variant(&variant);
                slots[i] = variant;
            }
            AssignAcross(i, foreign) => {
                let i = pick(i);
                match foreign {
                    Foreign::Int(x) => {
                        let source: Variant<(f64, u32)> = Variant::new(x);
                        slots[i].try_assign_across(&source).expect("u32 is an alternative");
                        assert!(copy_assign(&mut control[i], &Value::Int(x)));
                        assert!(slots[i] == source);
                    }
                    Foreign::Float(x) => {
                        let source: Variant<(f64, u32)> = Variant::new(x);
                        let err = slots[i].try_assign_across(&source).unwrap_err();
                        assert!(matches!(err, Error::BadAssignment(_)));
                    }
                }
            }
            TryClone(i) => {
                let i = pick(i);
                let result = slots[i].try_clone();
                let expected = control[i].as_ref().map(Value::copy);
                match (result, expected) {
                    (Ok(copy), None) => assert!(copy.is_valueless()),
                    (Ok(copy), Some(Some(value))) => assert_eq!(Value::from_variant(&copy), Some(value)),
                    (Err(_), Some(None)) => {}
                    (result, expected) => panic!("clone gave {result:?}, expected {expected:?}"),
                }
            }
            Compare(a, b) => {
                let (a, b) = (pick(a), pick(b));
                assert_eq!(slots[a] == slots[b], control[a] == control[b]);
            }
        }
    }
}

fn emplace(slot: &mut Slot, value: Value) {
    match value {
        Value::Int(x) => {
            slot.emplace_as(x);
        }
        Value::Text(s) => {
            slot.emplace_as(s);
        }
        Value::Fragile(f) => {
            slot.emplace_as(f);
        }
        Value::Volatile(v) => {
            slot.emplace_as(v);
        }
    }
}

fn set(slot: &mut Slot, value: Value) -> Result<(), LifetimeError> {
    match value {
        Value::Int(x) => slot.try_set(x),
        Value::Text(s) => slot.try_set(s),
        Value::Fragile(f) => slot.try_set(f),
        Value::Volatile(v) => slot.try_set(v),
    }
}

fn set_from(slot: &mut Slot, value: &Value) -> Result<(), LifetimeError> {
    match value {
        Value::Int(x) => slot.try_set_from(x),
        Value::Text(s) => slot.try_set_from(s),
        Value::Fragile(f) => slot.try_set_from(f),
        Value::Volatile(v) => slot.try_set_from(v),
    }
}
