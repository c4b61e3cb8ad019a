// Domain layer - Core models and pure rules
pub mod annotation;
pub mod highlight;
pub mod sample;
pub mod summary;
pub mod time;
pub mod zones;
