mod admin_user;

pub use admin_user::AdminUser;
