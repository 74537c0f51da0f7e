//! Simulation and interaction core for the hanging card.
//!
//! Platform-free: the web and native frontends feed pointer events and
//! viewport sizes in, call [`CardScene::frame`] once per display refresh, and
//! hand the resulting [`Scene`] to the renderer.

pub mod camera;
pub mod config;
pub mod constants;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod lifecycle;
pub mod physics;
pub mod rig;
pub mod scene;
pub mod spring;

pub use camera::{Camera, OrbitControls};
pub use config::{ConfigError, Connector, ConnectorKind, SceneConfig};
pub use frame::{CardScene, FrameStats};
pub use geometry::{Plane, Ray};
pub use interaction::{DragController, DragState};
pub use physics::{BodyId, BodyMode, PhysicsWorld, Pose};
pub use rig::{CardRig, ConnectorRig};
pub use scene::{Line, MeshNode, Scene};
