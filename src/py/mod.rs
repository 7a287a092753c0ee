use pyo3::prelude::*;

mod ellipse;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ellipse::PyEllipse>()?;
    m.add_function(wrap_pyfunction!(ellipse::ellipse, m)?)?;
    Ok(())
}
