mod register;

pub use register::RegisterParamsSchema;
