//! WASM bindings for Nodal Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'nodal_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit(`
//!   R1 1 0 10
//!   R2 2 0 5
//!   R3 1 2 15
//!   I1 2 2
//! `);
//!
//! console.log(circuit.node_voltage("2"));
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::{analyze, Analysis};
use crate::netlist;
use crate::solver::SolverConfig;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A solved circuit exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmCircuit {
    analysis: Analysis,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Parse and solve a netlist.
    ///
    /// # Returns
    /// A solved circuit or an error message if parsing or solving fails.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist_text: &str) -> Result<WasmCircuit, JsValue> {
        Self::with_tolerance(netlist_text, crate::solver::DEFAULT_KCL_TOLERANCE)
    }

    /// Parse and solve a netlist with a custom relative KCL tolerance.
    #[wasm_bindgen]
    pub fn with_tolerance(netlist_text: &str, kcl_tolerance: f64) -> Result<WasmCircuit, JsValue> {
        let circuit = netlist::parse(netlist_text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = SolverConfig::new().with_kcl_tolerance(kcl_tolerance);
        let analysis = analyze(&circuit, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmCircuit { analysis })
    }

    /// Voltage at a named node, or `undefined` if the node doesn't exist.
    #[wasm_bindgen]
    pub fn node_voltage(&self, node_name: &str) -> Option<f64> {
        self.analysis.solution.get(node_name)
    }

    /// Node names, ground first.
    #[wasm_bindgen]
    pub fn node_names(&self) -> Vec<String> {
        self.analysis.solution.iter().map(|(n, _)| n.to_string()).collect()
    }

    /// Resistor currents in declaration order.
    #[wasm_bindgen]
    pub fn branch_currents(&self) -> Vec<f64> {
        self.analysis.branch_currents.iter().map(|b| b.current).collect()
    }

    /// Largest absolute KCL net current over all nodes.
    #[wasm_bindgen]
    pub fn kcl_max_residual(&self) -> f64 {
        self.analysis.kcl.max_abs_net()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
