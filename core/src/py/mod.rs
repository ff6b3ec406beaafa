use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

// JSON-streng inn/ut – presentasjonslaget i Python gjør resten.

#[pyfunction]
fn analyze_gpx_json(gpx_xml: &str) -> PyResult<String> {
    crate::analyze_gpx_json(gpx_xml).map_err(PyValueError::new_err)
}

#[pyfunction]
fn plan_splits_json(json_in: &str) -> PyResult<String> {
    crate::plan_splits_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn gpx_to_csv(gpx_xml: &str) -> PyResult<String> {
    crate::gpx_to_csv(gpx_xml).map_err(PyValueError::new_err)
}

#[pymodule]
fn rungraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_gpx_json, m)?)?;
    m.add_function(wrap_pyfunction!(plan_splits_json, m)?)?;
    m.add_function(wrap_pyfunction!(gpx_to_csv, m)?)?;
    Ok(())
}
