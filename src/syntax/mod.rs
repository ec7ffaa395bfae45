mod binder;
mod common;

pub use binder::{top_level_declaration, DeclTarget, Resolver, ScopeBinder};
pub use common::{
    declared_as, descendants, identifiers, is_identifier, node_text, point_to_position,
};
