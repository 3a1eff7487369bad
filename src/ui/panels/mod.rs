// ProfileLookup - ui/panels/mod.rs

pub mod about;
pub mod lookup;
