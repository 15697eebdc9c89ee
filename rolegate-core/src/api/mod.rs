pub mod requests;
pub mod responses;

pub use requests::{CreatePostRequest, LoginRequest, RegisterRequest};
pub use responses::{
    DeleteUserResponse, ErrorBody, LoginResponse, MessageResponse, PostAuthor, PostView,
    RoleChangeResponse, UserProfile,
};
