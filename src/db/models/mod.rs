pub mod camera_models;
pub mod incident_models;
pub mod user_models;

pub use camera_models::{Camera, CameraWithIncidents};
pub use incident_models::{Incident, IncidentWithCamera};
pub use user_models::{NewUser, User};
