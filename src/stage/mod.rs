//! Interactive staging.

pub mod selector;

pub use selector::{
    FileGroups, SelectionSet, SelectorEffect, SelectorEvent, SelectorMode, SelectorPhase,
    WorkingTreeSelector,
};
