//! Layout inspection
//!
//! Builds an array of the requested shape, optionally derives a view from
//! it, and reports the descriptors of the result.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use smolar_array::{api, Array, Shape};
use tracing::debug;

use crate::commands::Command;
use crate::config::Config;
use crate::utils::{parse_list, print_array, print_output};

#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Comma-separated extents, e.g. `2,3,4`
    #[arg(short, long, allow_hyphen_values = true)]
    pub shape: String,

    /// Fill with uniform random values instead of 0, 1, 2, ...
    #[arg(long)]
    pub random: bool,

    /// Permute the axes, e.g. `2,0,1` or `-1,0,1`
    #[arg(long, allow_hyphen_values = true)]
    pub transpose: Option<String>,

    /// Reshape the (possibly transposed) array, e.g. `6,4`
    #[arg(long, allow_hyphen_values = true)]
    pub reshape: Option<String>,

    /// Print the elements as well
    #[arg(long)]
    pub show: bool,
}

impl InfoCommand {
    fn build(&self, config: &Config) -> Result<Array> {
        let shape = Shape::from_signed(&parse_list(&self.shape)?)?;
        let mut array = if self.random {
            Array::random_with(shape, &config.array)?
        } else {
            let mut array = Array::zeros_with(shape, &config.array)?;
            let values: Vec<f32> = (0..array.totalsize()).map(|v| v as f32).collect();
            array.fill_from_values(&values)?;
            array
        };

        if let Some(axes) = &self.transpose {
            array = api::transpose_new(&array, &parse_list(axes)?)?;
        }
        if let Some(target) = &self.reshape {
            array = api::reshape_new(&array, &parse_list(target)?)?;
        }
        Ok(array)
    }
}

impl Command for InfoCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing info command with config: {:?}", self);
        let array = self.build(config)?;

        if json_output {
            let mut data = serde_json::to_value(array.info())?;
            data["contiguous"] = json!(array.is_contiguous());
            if self.show {
                data["data"] = json!(array.to_vec());
            }
            return print_output(&data, true);
        }

        println!("{}", array.info());
        println!("Owner? {}", array.is_owner());
        if self.show {
            print_array("Elements:", &array, config.display.precision);
        }
        Ok(())
    }
}
