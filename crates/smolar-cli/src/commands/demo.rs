//! Demonstration programs
//!
//! Each demo builds small arrays through the flat API, runs one operation
//! and prints the operands and the result.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;
use smolar_array::{api, Array};
use std::time::Instant;
use tracing::{debug, info};

use crate::commands::Command;
use crate::config::Config;
use crate::utils::{array_json, format_duration, print_array, print_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// (3,1) column plus its (1,3) transpose
    AddTranspose,
    /// (2,1,3) plus (2,2,3) with a broadcast middle axis
    BroadcastAdd,
    /// Dot product of 1..=10 with itself
    Dot,
    /// Batched (5,4,2,3) x (5,4,3,4) product, timed over several runs
    Matmul,
    /// (3,) expanded at -1 then at 0
    ExpandDims,
    /// (3,1,2,1) squeezed at -1 then at 1
    Squeeze,
}

#[derive(Args, Debug)]
pub struct DemoCommand {
    /// Demonstration to run
    #[arg(value_enum)]
    pub demo: Demo,

    /// Runs for the matmul demo
    #[arg(long, default_value = "5")]
    pub runs: u32,
}

/// Operands and result of one demo run
struct DemoOutput {
    operands: Vec<(&'static str, Array)>,
    result: Array,
}

fn arange_shaped(stop: f32, shape: &[i64]) -> Result<Array> {
    let flat = api::arange(1.0, stop, 1.0)?;
    Ok(api::reshape_new(&flat, shape)?)
}

impl DemoCommand {
    fn build(&self) -> Result<DemoOutput> {
        let output = match self.demo {
            Demo::AddTranspose => {
                let a = arange_shaped(4.0, &[3, 1])?;
                let b = api::transpose_new(&arange_shaped(4.0, &[3, 1])?, &[1, 0])?;
                let result = api::add(&a, &b)?;
                DemoOutput {
                    operands: vec![("a", a), ("b (a.T)", b)],
                    result,
                }
            }
            Demo::BroadcastAdd => {
                let a = arange_shaped(7.0, &[2, 1, 3])?;
                let b = arange_shaped(13.0, &[2, 2, 3])?;
                let result = api::add(&a, &b)?;
                DemoOutput {
                    operands: vec![("a", a), ("b", b)],
                    result,
                }
            }
            Demo::Dot => {
                let a = api::arange(1.0, 11.0, 1.0)?;
                let b = api::arange(1.0, 11.0, 1.0)?;
                let result = api::dot(&a, &b)?;
                DemoOutput {
                    operands: vec![("a", a), ("b", b)],
                    result,
                }
            }
            Demo::Matmul => {
                let a = arange_shaped((5 * 4 * 2 * 3 + 1) as f32, &[5, 4, 2, 3])?;
                let b = arange_shaped((5 * 4 * 3 * 4 + 1) as f32, &[5, 4, 3, 4])?;
                let result = self.time_matmul(&a, &b)?;
                DemoOutput {
                    operands: vec![("a", a), ("b", b)],
                    result,
                }
            }
            Demo::ExpandDims => {
                let a = api::arange(1.0, 4.0, 1.0)?;
                let result = api::expand_dims(&api::expand_dims(&a, -1)?, 0)?;
                DemoOutput {
                    operands: vec![("a", a)],
                    result,
                }
            }
            Demo::Squeeze => {
                let a = arange_shaped(7.0, &[3, 1, 2, 1])?;
                let result = api::squeeze(&api::squeeze(&a, -1)?, 1)?;
                DemoOutput {
                    operands: vec![("a", a)],
                    result,
                }
            }
        };
        Ok(output)
    }

    fn time_matmul(&self, a: &Array, b: &Array) -> Result<Array> {
        let runs = self.runs.max(1);
        let mut total = std::time::Duration::ZERO;
        let mut last = None;
        for run in 1..=runs {
            let start = Instant::now();
            let result = api::matmul(a, b).context("matmul failed")?;
            let elapsed = start.elapsed();
            total += elapsed;
            debug!("completed run {} in {}", run, format_duration(elapsed));
            if let Some(previous) = last.replace(result) {
                api::release(previous);
            }
        }
        info!(
            "average matmul time over {} runs: {}",
            runs,
            format_duration(total / runs)
        );
        last.context("matmul produced no result")
    }
}

impl Command for DemoCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing demo command: {:?}", self);
        let output = self.build()?;

        if json_output {
            let operands: serde_json::Map<String, serde_json::Value> = output
                .operands
                .iter()
                .map(|(name, array)| (name.to_string(), array_json(array)))
                .collect();
            let data = json!({
                "demo": format!("{:?}", self.demo),
                "operands": operands,
                "result": array_json(&output.result),
            });
            return print_output(&data, true);
        }

        let precision = config.display.precision;
        for (name, array) in &output.operands {
            print_array(&format!("Array {}:", name), array, precision);
        }
        print_array("Result:", &output.result, precision);
        println!();
        output.result.print_info();

        for (_, array) in output.operands {
            api::release(array);
        }
        api::release(output.result);
        Ok(())
    }
}
