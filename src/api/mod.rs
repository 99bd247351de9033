pub mod gateway;

pub use gateway::GatewayApi;
