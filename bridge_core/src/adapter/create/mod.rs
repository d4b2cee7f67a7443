//! Object creation and property setting, one module per entity family.
//!
//! Every `create_*` function returns the entity's [`ExternalId`](crate::registry::ExternalId)
//! or the error that stopped it. Every `set_*` function returns `true` when
//! all of its property groups were applied.

mod bars;
mod links;
mod loadcases;
mod loads;
mod nodes;
mod panels;
mod properties;
