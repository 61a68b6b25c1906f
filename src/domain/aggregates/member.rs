//! Member

use uuid::Uuid;

/// The acting customer. Owns coupons, orders and a cart; never mutated here.
#[derive(Clone, Debug)]
pub struct Member {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}
