pub mod driver_controller;
pub mod general_controller;
pub mod home_controller;
pub mod login_controller;
pub mod notification_controller;
pub mod send_controller;
pub mod user_controller;
