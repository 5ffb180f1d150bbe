pub mod cricket_server;
pub mod external_server;
