pub mod grading;

pub mod projects;

pub mod submissions;

pub use grading::configure_grading_routes;
pub use projects::configure_projects_routes;
pub use submissions::configure_submissions_routes;
