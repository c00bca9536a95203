mod health_check;
mod messages;
