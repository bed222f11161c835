//! Internal numeric helpers shared by the kernel routines.

pub(crate) mod scalar;
