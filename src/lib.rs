//! Construction-site planning viewport.
//!
//! This crate owns the interactive core of a site-planning tool: a camera the
//! user can rotate, pan and zoom around a building model, a drop pipeline that
//! turns palette drops (tower crane, scaffold, container) into placed objects
//! on the ground, and the registry that keeps the drawn scene and the
//! inspection list in step. The host is responsible only for feeding typed
//! [`engine::HostEvent`]s in and presenting the resulting display lists.
//!
//! Two camera variants share every other component: a cheap pseudo-3D
//! projection ([`camera::FlatCamera`]) and a perspective orbit camera
//! ([`orbit::OrbitCamera`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: owns one of each component, dispatches host events |
//! | [`viewport`] | [`viewport::ViewportController`] and the [`viewport::CameraRig`] seam |
//! | [`input`] | Buttons, drag modes and the drag state machine |
//! | [`camera`] | Flat pseudo-3D camera and screen/world conversions |
//! | [`orbit`] | Orbit camera, view-projection and ground-plane rays |
//! | [`placement`] | Drop payloads and the placement pipeline |
//! | [`recipe`] | Equipment kinds and their procedural geometry |
//! | [`scene`] | Placed objects and the ordered scene registry |
//! | [`visual`] | Retained visuals owned by placed objects |
//! | [`sync_list`] | The placed-equipment list kept in sync with the registry |
//! | [`model`] | Building model bounds, loader seam and upload status |
//! | [`render`] | Display lists and the flat/orbit painters |
//! | [`frame_loop`] | Frame clocks, surfaces and the render loop |
//! | [`svg`] | SVG presentation surface |
//! | [`session`] | Scripted event timelines for headless sessions |
//! | [`config`] | Viewer configuration from the environment |
//! | [`color`] | Colors and stroke styles |
//! | [`consts`] | Shared numeric constants (zoom limits, default pose, grid) |
//! | [`error`] | Stable error codes shared by the error enums |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod model;
pub mod orbit;
pub mod placement;
pub mod recipe;
pub mod render;
pub mod scene;
pub mod session;
pub mod svg;
pub mod sync_list;
pub mod viewport;
pub mod visual;
