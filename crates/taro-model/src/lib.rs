//! `taro-model` — the validated, read-only view over a loaded TARO binary
//! model: metadata, CSR topology, the ID mapper, turn costs, and the raw
//! spatial-index / landmark tables.
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|------------------------------------------------------|
//! | [`store`]       | `ModelStore`, `load`                                |
//! | [`builder`]     | `ModelBuilder` — in-memory / test model construction |
//! | [`metadata`]    | `Metadata`                                          |
//! | [`topology`]    | `GraphTopology`, `NO_PROFILE` sentinel              |
//! | [`profile`]     | `RawProfile`                                        |
//! | [`turn`]        | `TurnCost`, `TurnCostTable`                          |
//! | [`spatial_index`] | `KdNode`, `SpatialIndex`, `NO_CHILD` sentinel      |
//! | [`landmark`]    | `Landmark`                                          |
//! | [`id_map`]      | `IdMapper`                                          |
//! | [`error`]       | `ModelContractError`, `ModelResult<T>`               |

pub mod builder;
pub mod error;
pub mod id_map;
pub mod landmark;
pub mod metadata;
pub mod profile;
pub mod reader;
pub mod spatial_index;
pub mod store;
pub mod topology;
pub mod turn;
pub mod writer;


pub use builder::ModelBuilder;
pub use error::{ModelContractError, ModelResult};
pub use id_map::IdMapper;
pub use landmark::Landmark;
pub use metadata::Metadata;
pub use profile::RawProfile;
pub use spatial_index::{KdNode, SpatialIndex, NO_CHILD};
pub use store::{load, ModelStore};
pub use topology::{GraphTopology, NO_PROFILE};
pub use turn::{TurnCost, TurnCostTable};
