// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use anyhow::Context;
use clap::Parser;
use libdd_static_profiling::callgraph::CallGraph;
use libdd_static_profiling::pprof::{write_profile, ProfileEncoder};
use libdd_static_profiling::synthesis::{Sample, SynthesisConfig, Synthesizer, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// sprof: static profiling.
///
/// Reads the call graph of a program, as produced by a whole-program
/// analysis, and writes a pprof file estimating where execution cost
/// concentrates. The program is never run.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The call graph to analyze (JSON).
    callgraph: PathBuf,

    /// Where to write the pprof output.
    output: PathBuf,

    /// Stop descending after this many frames.
    #[arg(long, env = "DD_SPROF_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log filter, e.g. `info` or `libdd_static_profiling=debug`.
    #[arg(long, env = "DD_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Verbose printing of the synthesized stacks, leaf first.
    #[arg(long)]
    print_samples: bool,
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(filter).context("could not parse log level")?)
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn print_samples(samples: &[Sample<'_>]) {
    for sample in samples {
        println!("{}", sample.count);
        for frame in sample.frames.iter().rev() {
            println!("  {frame}");
        }
        println!();
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    info!("loading call graph from {}", args.callgraph.display());
    let graph = CallGraph::from_path(&args.callgraph)
        .with_context(|| format!("failed to load call graph {}", args.callgraph.display()))?;
    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "performing static profiling"
    );

    let config = SynthesisConfig::default().with_max_depth(args.max_depth);
    let samples = Synthesizer::new(&graph).with_config(config).synthesize();
    if args.print_samples {
        print_samples(&samples);
    }

    info!(samples = samples.len(), "writing pprof file {}", args.output.display());
    let doc = ProfileEncoder::new().encode(&samples);
    write_profile(&doc, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = init_logging(&args.log_level).and_then(|()| run(&args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use prost::Message;
    use std::io::Read;

    fn args(callgraph: PathBuf, output: PathBuf) -> Args {
        Args::parse_from([
            "sprof".into(),
            callgraph.into_os_string(),
            output.into_os_string(),
        ])
    }

    #[test]
    fn argument_count_is_enforced() {
        assert!(Args::try_parse_from(["sprof"]).is_err());
        assert!(Args::try_parse_from(["sprof", "graph.json"]).is_err());
        assert!(Args::try_parse_from(["sprof", "a", "b", "c"]).is_err());

        let parsed = Args::try_parse_from(["sprof", "graph.json", "out.pprof"]).unwrap();
        assert_eq!(parsed.callgraph, PathBuf::from("graph.json"));
        assert_eq!(parsed.output, PathBuf::from("out.pprof"));
        assert!(!parsed.print_samples);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn writes_profile() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        let output = dir.path().join("out.pprof");
        std::fs::write(
            &graph,
            r#"{ "root": 0, "nodes": [
                { "path": "main", "name": "main", "body_size": 0, "callees": [1] },
                { "path": "main", "name": "work", "body_size": 40, "callees": [] }
            ] }"#,
        )
        .unwrap();

        run(&args(graph, output.clone())).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let mut raw = Vec::new();
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut raw).unwrap();
        let pprof = libdd_static_profiling::pprof::proto::Profile::decode(raw.as_slice()).unwrap();
        assert_eq!(pprof.samples.len(), 1);
        // 40 / 2 + 1
        assert_eq!(pprof.samples[0].values, vec![21]);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn missing_entry_point_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        let output = dir.path().join("out.pprof");
        std::fs::write(&graph, r#"{ "nodes": [ { "name": "main" } ] }"#).unwrap();

        let err = run(&args(graph, output.clone())).unwrap_err();
        assert!(format!("{err:#}").contains("no entry point"));
        assert!(!output.exists());
    }
}
