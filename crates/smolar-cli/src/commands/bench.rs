//! Matmul timing
//!
//! Times batched matrix multiplication on random operands. The default
//! operands are the reference `(2,50,1000) x (2,1000,30)` workload.

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::json;
use smolar_array::{ops, Array, Shape};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::commands::Command;
use crate::config::Config;
use crate::utils::{format_duration, parse_list, print_output, print_success};

#[derive(Args, Debug)]
pub struct BenchCommand {
    /// Left operand shape
    #[arg(long, default_value = "2,50,1000")]
    pub lhs: String,

    /// Right operand shape
    #[arg(long, default_value = "2,1000,30")]
    pub rhs: String,

    /// Number of timed iterations (overrides config)
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Number of warmup iterations (overrides config)
    #[arg(long)]
    pub warmup: Option<u32>,
}

#[derive(Debug)]
pub struct BenchResult {
    pub output_shape: Shape,
    pub times: Vec<Duration>,
}

impl BenchResult {
    pub fn mean(&self) -> Duration {
        if self.times.is_empty() {
            return Duration::ZERO;
        }
        self.times.iter().sum::<Duration>() / self.times.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.times.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.times.iter().copied().max().unwrap_or_default()
    }
}

impl BenchCommand {
    fn run(&self, config: &Config) -> Result<BenchResult> {
        let iterations = self.iterations.unwrap_or(config.bench.iterations).max(1);
        let warmup = self.warmup.unwrap_or(config.bench.warmup_iterations);

        let a = Array::random_with(Shape::from_signed(&parse_list(&self.lhs)?)?, &config.array)?;
        let b = Array::random_with(Shape::from_signed(&parse_list(&self.rhs)?)?, &config.array)?;
        info!("Benchmarking matmul {} x {}", a.shape(), b.shape());

        for _ in 0..warmup {
            ops::matmul(&a, &b)?;
        }

        let mut times = Vec::with_capacity(iterations as usize);
        let mut output_shape = Shape::scalar();
        for i in 0..iterations {
            let start = Instant::now();
            let result = ops::matmul(&a, &b)?;
            let elapsed = start.elapsed();
            debug!("iteration {} took {}", i + 1, format_duration(elapsed));
            times.push(elapsed);
            output_shape = result.shape().clone();
        }

        Ok(BenchResult {
            output_shape,
            times,
        })
    }
}

impl Command for BenchCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing bench command: {:?}", self);
        let result = self.run(config)?;

        let data = json!({
            "lhs": self.lhs,
            "rhs": self.rhs,
            "output_shape": result.output_shape.dims(),
            "iterations": result.times.len(),
            "mean_ms": result.mean().as_secs_f64() * 1e3,
            "min_ms": result.min().as_secs_f64() * 1e3,
            "max_ms": result.max().as_secs_f64() * 1e3,
        });

        if !json_output {
            println!(
                "{} ({} per run)",
                style("Matmul benchmark").bold().cyan(),
                format_duration(result.mean())
            );
        }
        print_output(&data, json_output)?;
        if !json_output {
            print_success("Benchmark completed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_result_stats() {
        let result = BenchResult {
            output_shape: Shape::from([2, 2]),
            times: vec![Duration::from_millis(10), Duration::from_millis(30)],
        };
        assert_eq!(result.mean(), Duration::from_millis(20));
        assert_eq!(result.min(), Duration::from_millis(10));
        assert_eq!(result.max(), Duration::from_millis(30));
    }

    #[test]
    fn test_small_run() {
        let cmd = BenchCommand {
            lhs: "3,4".into(),
            rhs: "4,2".into(),
            iterations: Some(2),
            warmup: Some(0),
        };
        let result = cmd.run(&Config::default()).unwrap();
        assert_eq!(result.output_shape.dims(), &[3, 2]);
        assert_eq!(result.times.len(), 2);
    }
}
