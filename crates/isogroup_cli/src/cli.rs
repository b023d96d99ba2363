use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use eyre::{Context, OptionExt, Result, bail};
use isogroup::prelude::*;
use isomath::prelude::*;
use itertools::Itertools;
use serde::Serialize;

use crate::settings::Settings;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Inspect 3D point-symmetry groups", long_about = None)]
pub(crate) struct Args {
    /// Settings file (YAML) that overrides the built-in defaults
    #[arg(long = "config", value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// List the subgroup classes of a group class
    Subgroups {
        /// Group class, such as `D4xI` or `A5`
        class: GroupClass,
    },
    /// List the elements of a group
    Elements {
        #[command(flatten)]
        group: GroupArgs,
    },
    /// List every realisation of a subgroup class inside a group
    Realise {
        #[command(flatten)]
        group: GroupArgs,
        /// Subgroup class to realise
        subgroup: GroupClass,
    },
    /// List the stabiliser choices for colouring an orbit
    Colourings {
        #[command(flatten)]
        orbit: OrbitArgs,
    },
    /// Partition the final group of an orbit into colour classes
    Colour {
        #[command(flatten)]
        orbit: OrbitArgs,
        /// Family of stabiliser choices
        #[arg(long, default_value = "higher")]
        order: StabiliserOrder,
        /// Index of the stabiliser choice, as listed by `colourings`
        prop: usize,
        /// Index of the realisation of the stabiliser choice
        #[arg(default_value_t = 0)]
        realisation: usize,
    },
    /// Partition a group into cosets of one of its subgroups
    Quotient {
        #[command(flatten)]
        group: GroupArgs,
        /// Subgroup class
        subgroup: GroupClass,
        /// Setup entries for the subgroup
        #[arg(long = "subgroup-setup", value_name = "KEY=VALUE", value_parser = parse_setup_entry)]
        subgroup_setup: Vec<(SetupKey, SetupValue)>,
    },
    /// Close a list of isometries into a group and identify it
    Generate {
        /// JSON file containing a list of isometries, use '-' for stdin
        #[arg(value_parser)]
        input: clio::Input,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct GroupArgs {
    /// Group class, such as `D4xI` or `A5`
    class: GroupClass,
    /// Setup entry such as `axis=0,0,1` or `n=3` (may be repeated)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_setup_entry)]
    setup: Vec<(SetupKey, SetupValue)>,
}

impl GroupArgs {
    fn build(&self) -> Result<SymmetryGroup> {
        build_group(self.class, &self.setup)
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct OrbitArgs {
    /// Symmetry group of the whole orbit
    final_class: GroupClass,
    /// Symmetry group of a single object in the orbit
    stabiliser_class: GroupClass,
    /// Setup entries for the final group
    #[arg(long = "final-setup", value_name = "KEY=VALUE", value_parser = parse_setup_entry)]
    final_setup: Vec<(SetupKey, SetupValue)>,
    /// Setup entries for the stabiliser
    #[arg(long = "stabiliser-setup", value_name = "KEY=VALUE", value_parser = parse_setup_entry)]
    stabiliser_setup: Vec<(SetupKey, SetupValue)>,
}

impl OrbitArgs {
    fn build(&self) -> Result<Orbit> {
        let final_group = build_group(self.final_class, &self.final_setup)?;
        let stabiliser = build_group(self.stabiliser_class, &self.stabiliser_setup)?;
        Ok(Orbit::new(final_group, stabiliser)?)
    }
}

#[derive(Serialize, Debug)]
struct PropOutput {
    order: String,
    index_in_order: usize,
    class: GroupClass,
    colours: usize,
    realisations: Vec<GroupRepr>,
}

pub(crate) fn exec(subcommand: Subcommand, settings: &Settings) -> Result<()> {
    match subcommand {
        Subcommand::Subgroups { class } => {
            let subgroups = class.canonicalize().subgroups();
            write_json_output(&*subgroups, settings)
        }

        Subcommand::Elements { group } => {
            let group = group.build()?;
            let kinds = group.iter().map(|e| e.kind()).collect_vec();
            write_json_output(&kinds, settings)
        }

        Subcommand::Realise { group, subgroup } => {
            let group = group.build()?;
            let reprs = group
                .realise_subgroups(subgroup)?
                .iter()
                .map(|g| g.repr())
                .collect_vec();
            write_json_output(&reprs, settings)
        }

        Subcommand::Colourings { orbit } => {
            let orbit = orbit.build()?;
            let mut output = vec![];
            for order in [StabiliserOrder::Higher, StabiliserOrder::Lower] {
                let props = match order {
                    StabiliserOrder::Higher => orbit.higher_order_stabiliser_props()?,
                    StabiliserOrder::Lower => orbit.lower_order_stabiliser_props()?,
                };
                for (i, prop) in props.iter().enumerate() {
                    let stabs = match order {
                        StabiliserOrder::Higher => orbit.higher_order_stabilisers(i)?,
                        StabiliserOrder::Lower => orbit.lower_order_stabilisers(i)?,
                    };
                    output.push(PropOutput {
                        order: order.to_string(),
                        index_in_order: i,
                        class: prop.class,
                        colours: prop.index,
                        realisations: stabs.iter().map(|g| g.repr()).collect(),
                    });
                }
            }
            write_json_output(&output, settings)
        }

        Subcommand::Colour {
            orbit,
            order,
            prop,
            realisation,
        } => {
            let orbit = orbit.build()?;
            let colouring = orbit
                .colouring(order, prop, realisation)
                .wrap_err_with(|| format!("no {order} order stabiliser #{prop}.{realisation}"))?;
            write_json_output(&cosets_output(&colouring.cosets), settings)
        }

        Subcommand::Quotient {
            group,
            subgroup,
            subgroup_setup,
        } => {
            let group = group.build()?;
            let subgroup = build_group(subgroup, &subgroup_setup)?;
            let cosets = group.quotient_set(&subgroup)?;
            write_json_output(&cosets_output(&cosets), settings)
        }

        Subcommand::Generate { mut input } => {
            let kinds = read_isometries(&mut input)?;
            let generators = kinds
                .iter()
                .map(|kind| Isometry::from_kind(kind).ok_or_eyre(format!("bad isometry {kind}")))
                .collect::<Result<IsometrySet>>()?;
            let elements = generators
                .group(settings.max_closure_iterations)
                .wrap_err("error closing isometries into a group")?;
            log::info!("generated {} elements", elements.len());
            let group = SymmetryGroup::identify(elements)?;
            write_json_output(&group.repr(), settings)
        }
    }
}

fn build_group(class: GroupClass, entries: &[(SetupKey, SetupValue)]) -> Result<SymmetryGroup> {
    let setup: Setup = entries.iter().copied().collect();
    SymmetryGroup::new(class, &setup).wrap_err_with(|| format!("error constructing {class}"))
}

fn cosets_output(cosets: &[IsometrySet]) -> Vec<Vec<IsometryKind>> {
    cosets
        .iter()
        .map(|coset| coset.iter().map(|e| e.kind()).collect())
        .collect()
}

fn read_isometries(input: &mut clio::Input) -> Result<Vec<IsometryKind>> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .wrap_err_with(|| format!("error reading {}", input.path()))?;
    serde_json::from_str(&buffer).context("error parsing isometry list")
}

/// Parses a setup entry such as `axis=0,0,1` or `n=3`.
fn parse_setup_entry(s: &str) -> Result<(SetupKey, SetupValue)> {
    let (key, value) = s.split_once('=').ok_or_eyre("expected KEY=VALUE")?;
    let key = SetupKey::from_str(key.trim()).map_err(|_| eyre::eyre!("unknown key {key:?}"))?;
    let value = value.trim();
    if key == SetupKey::N {
        let n = value.parse().wrap_err("expected integer")?;
        return Ok((key, SetupValue::Order(n)));
    }
    let coords: Vec<Float> = value
        .split(',')
        .map(|x| x.trim().parse::<Float>())
        .try_collect()
        .wrap_err("expected three comma-separated numbers")?;
    let &[x, y, z] = coords.as_slice() else {
        bail!("expected three comma-separated numbers, got {}", coords.len());
    };
    Ok((key, SetupValue::Axis(Vector::new(x, y, z))))
}

fn write_json_output<T: Serialize + ?Sized>(value: &T, settings: &Settings) -> Result<()> {
    let stdout = std::io::stdout();
    if settings.pretty {
        serde_json::to_writer_pretty(stdout, value)
    } else {
        serde_json::to_writer(stdout, value)
    }
    .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_setup_entry() {
        assert_eq!(
            parse_setup_entry("axis_n=1, 0, 0").unwrap(),
            (SetupKey::AxisN, SetupValue::Axis(Vector::X)),
        );
        assert_eq!(
            parse_setup_entry("n=5").unwrap(),
            (SetupKey::N, SetupValue::Order(5)),
        );
        assert!(parse_setup_entry("axis").is_err());
        assert!(parse_setup_entry("axis=1,2").is_err());
        assert!(parse_setup_entry("sideways=0,0,1").is_err());
        assert!(parse_setup_entry("n=two").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "isogroup",
            "realise",
            "D4",
            "--setup",
            "axis_n=0,1,0",
            "C2",
        ])
        .unwrap();
        let Subcommand::Realise { group, subgroup } = args.subcommand else {
            panic!("wrong subcommand");
        };
        assert_eq!(group.class, GroupClass::Dn(4));
        assert_eq!(subgroup, GroupClass::Cn(2));
        let built = group.build().unwrap();
        assert_eq!(built.class(), GroupClass::Dn(4));
        let quarter_turn = Isometry::rotation(Vector::Y, std::f64::consts::FRAC_PI_2).unwrap();
        assert!(built.contains(&quarter_turn));
    }

    #[test]
    fn test_parse_colour_args() {
        let args =
            Args::try_parse_from(["isogroup", "colour", "A4", "D2", "--order", "lower", "2"])
                .unwrap();
        let Subcommand::Colour {
            order,
            prop,
            realisation,
            ..
        } = args.subcommand
        else {
            panic!("wrong subcommand");
        };
        assert_eq!(order, StabiliserOrder::Lower);
        assert_eq!(prop, 2);
        assert_eq!(realisation, 0);
    }

    #[test]
    fn test_generate_reads_isometry_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("klein.json");
        let json = r#"[
            {"type": "half_turn", "axis": [1, 0, 0]},
            {"type": "half_turn", "axis": [0, 1, 0]}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let args = Args::try_parse_from([
            OsStr::new("isogroup"),
            OsStr::new("generate"),
            path.as_os_str(),
        ])
        .unwrap();
        let Subcommand::Generate { mut input } = args.subcommand else {
            panic!("wrong subcommand");
        };
        let kinds = read_isometries(&mut input).unwrap();
        assert_eq!(kinds.len(), 2);

        let generators: IsometrySet = kinds.iter().filter_map(Isometry::from_kind).collect();
        let group = SymmetryGroup::identify(generators.group(50).unwrap()).unwrap();
        assert_eq!(group.class(), GroupClass::Dn(2));
    }

    #[test]
    fn test_generate_accepts_stdin() {
        let args = Args::try_parse_from(["isogroup", "generate", "-"]).unwrap();
        let Subcommand::Generate { input } = args.subcommand else {
            panic!("wrong subcommand");
        };
        assert!(input.is_std());
    }

    #[test]
    fn test_bad_class_arg() {
        assert!(Args::try_parse_from(["isogroup", "subgroups", "Q7"]).is_err());
    }
}
