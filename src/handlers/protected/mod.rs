// handlers/protected - every route here sits behind jwt_auth_middleware

pub mod shows;
pub mod users;
pub mod watch;
