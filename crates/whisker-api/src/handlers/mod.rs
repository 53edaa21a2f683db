pub mod chats;
pub mod forms;
pub mod health;
pub mod register;
pub mod upload;
