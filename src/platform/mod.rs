// ProfileLookup - platform/mod.rs
//
// Platform abstraction layer: config directories and network I/O.
// Dependencies: core (request/transport types), directories, reqwest.
// Must NOT depend on: app, ui.

pub mod config;
pub mod http;
