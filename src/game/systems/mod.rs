pub mod combat;
pub mod kinematics;
pub mod spawner;
