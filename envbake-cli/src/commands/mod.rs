pub mod bake;
pub mod envs;
pub mod provision;
