use std::collections::BTreeSet;
use std::fmt::{Debug, Display};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

///
/// An indeterminate, identified by a numeric id. Variables are totally ordered by their id;
/// the name is only used when printing.
///
/// Both id and name are serialized. Since names are `&'static str`, the name of a deserialized
/// variable is interned, i.e. every distinct name is allocated once and then kept for the
/// rest of the program.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// let x = Variable::new(0, "x");
/// let y = Variable::new(1, "y");
/// assert!(x < y);
/// assert_eq!(x, Variable::new(0, "renamed"));
/// assert_eq!("y", format!("{}", y));
/// ```
///
#[derive(Clone, Copy, Serialize)]
pub struct Variable {
    id: u32,
    name: &'static str
}

#[derive(Deserialize)]
struct VariableData {
    id: u32,
    name: String
}

static INTERNED_NAMES: Mutex<BTreeSet<&'static str>> = Mutex::new(BTreeSet::new());

fn intern_name(name: String) -> &'static str {
    let mut names = match INTERNED_NAMES.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner()
    };
    if let Some(interned) = names.get(name.as_str()) {
        return *interned;
    }
    let interned: &'static str = Box::leak(name.into_boxed_str());
    names.insert(interned);
    return interned;
}

impl<'de> Deserialize<'de> for Variable {

    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        VariableData::deserialize(deserializer).map(Variable::from)
    }
}

impl From<VariableData> for Variable {

    fn from(data: VariableData) -> Self {
        Variable { id: data.id, name: intern_name(data.name) }
    }
}

impl Variable {

    pub const fn new(id: u32, name: &'static str) -> Self {
        Variable { id, name }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Variable {

    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {

    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {

    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Variable {

    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl Display for Variable {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Debug for Variable {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

#[test]
fn test_variable_serialization() {
    let y = Variable::new(7, "y");
    let serialized = serde_json::to_string(&y).unwrap();
    let deserialized: Variable = serde_json::from_str(&serialized).unwrap();
    assert_eq!(y, deserialized);
    assert_eq!(7, deserialized.id());
    assert_eq!(format!("{}", y), format!("{}", deserialized));
    assert_eq!(format!("{:?}", y), format!("{:?}", deserialized));

    let again: Variable = serde_json::from_str(&serialized).unwrap();
    assert!(std::ptr::eq(deserialized.name(), again.name()));
    let other: Variable = serde_json::from_str(r#"{"id":7,"name":"t"}"#).unwrap();
    assert_eq!("t", other.name());
}
