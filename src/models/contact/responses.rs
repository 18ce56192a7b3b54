use super::entities::ContactMessage;
use crate::models::common::PaginatedResponse;

pub type ContactListResponse = PaginatedResponse<ContactMessage>;
