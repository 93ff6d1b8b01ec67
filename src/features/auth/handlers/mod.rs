pub mod auth_handler;

pub use auth_handler::{
    __path_get_profile, __path_login, __path_logout, __path_refresh_token, __path_register,
    get_profile, login, logout, refresh_token, register,
};
