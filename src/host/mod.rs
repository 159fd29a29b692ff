pub mod snake_host;
