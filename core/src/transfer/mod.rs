pub mod model;
pub mod transfer_service;
