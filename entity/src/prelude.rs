pub use super::address::Entity as Address;
pub use super::booking::Entity as Booking;
pub use super::business::Entity as Business;
pub use super::pet::Entity as Pet;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::service::Entity as Service;
pub use super::user::Entity as User;
pub use super::user_profile::Entity as UserProfile;
