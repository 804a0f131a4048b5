pub mod driver_repository;
pub mod route_repository;
pub mod send_repository;
pub mod user_repository;

pub use driver_repository::DriverRepository;
pub use route_repository::RouteRepository;
pub use send_repository::SendRepository;
pub use user_repository::UserRepository;
