pub mod identity;
pub mod renewal_record;
pub mod token_class;
pub mod user;
