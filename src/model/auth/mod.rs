mod audience;
mod session;
mod token;

pub use audience::{Admin, Anyone, Audience, Citizen};
pub use session::{authenticate, AdminAccount, AuthError, Credentials, Session};
pub use token::{session_cookie, user_from_cookie, AuthToken, AUTH_TOKEN_COOKIE};
