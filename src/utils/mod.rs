pub mod health_calculations;
