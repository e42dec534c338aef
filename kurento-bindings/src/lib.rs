//! Kurento client bindings generated at build time from the IDL descriptions
//! under `schema/`.

include!(concat!(env!("OUT_DIR"), "/kurento/mod.rs"));
