//! Domain record types for the three public collections.
//!
//! These are the shapes persisted in `PostgreSQL` and serialized to the
//! site's consumers (camelCase on the wire).

pub mod donor;
pub mod gallery;
pub mod member;

pub use donor::{Donor, NewDonor};
pub use gallery::{GalleryImage, NewGalleryImage};
pub use member::{Member, NewMember};
