//! Worker adapters

mod python;

pub use python::PythonWorker;
