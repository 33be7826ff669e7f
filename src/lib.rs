//! Dice Shaker library
//!
//! The 3D dice scene (scene store, physics bootstrap, camera, asset loading,
//! boundary, dice population, and actions) lives in [`dice3d`].

pub mod dice3d;
