// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::io::{self, BufRead, Stdout, Write};
use std::path::{Path, PathBuf};

use kdviz_controller::{
    ApiClient, Completion, IdBounds, InputEvent, Key, SearchController, TextPanel,
};
use kdviz_partition::surfaces::svg::SvgSurface;
use kdviz_partition::{DIAGRAM_BOUNDS, PartitionTree, render};
use kdviz_scatter::{FrameLog, ScatterManager};

use crate::cli::{InteractiveArgs, OutputArgs, RunConfig, SearchArgs};
use crate::error::{KdvizError, Result};

type Controller = SearchController<TextPanel<Stdout>, FrameLog>;

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| KdvizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).map_err(|source| KdvizError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn embedding_table(client: &ApiClient, input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => read_file(path),
        None => client.embedding_table().map_err(KdvizError::plot),
    }
}

fn load_scene(client: &ApiClient, input: Option<&Path>) -> Result<ScatterManager<FrameLog>> {
    let table = embedding_table(client, input)?;
    let mut scene = ScatterManager::with_default_view(FrameLog::keep_last(1));
    scene.load(&table).map_err(KdvizError::plot)?;
    Ok(scene)
}

fn write_figure(scene: &ScatterManager<FrameLog>, out: Option<&Path>) -> Result<()> {
    match scene.sink().latest() {
        Some(frame) => write_output(out, &frame.to_figure()?),
        None => Ok(()),
    }
}

fn controller(config: &RunConfig, input: Option<&Path>) -> Result<(ApiClient, Controller)> {
    let client = ApiClient::new(&config.client)?;
    let scene = load_scene(&client, input)?;
    let mut controller = SearchController::new(TextPanel::new(io::stdout()), scene)
        .with_image_base(client.base_url());
    match config.max_id {
        Some(max) => controller = controller.with_bounds(IdBounds::new(max)),
        None => {
            controller.bound_to_dataset();
        }
    }
    Ok((client, controller))
}

/// `kdviz tree`: render the partition diagram as SVG.
pub(crate) fn run_tree(config: &RunConfig, args: OutputArgs) -> Result<()> {
    let json = match &args.input {
        Some(path) => read_file(path)?,
        None => ApiClient::new(&config.client)?
            .tree_data()
            .map_err(KdvizError::tree)?,
    };
    let tree = PartitionTree::from_json(&json).map_err(KdvizError::tree)?;
    if let Err(violation) = tree.check_invariant() {
        tracing::warn!(%violation, "partition tree violates the split invariant; rendering as given");
    }
    let mut svg = SvgSurface::default();
    let stats = render(&tree, DIAGRAM_BOUNDS, &mut svg);
    tracing::info!(lines = stats.lines, markers = stats.markers, depth = tree.depth(), "tree rendered");
    write_output(args.out.as_deref(), &svg.document())
}

/// `kdviz scatter`: write the background figure.
pub(crate) fn run_scatter(config: &RunConfig, args: OutputArgs) -> Result<()> {
    let client = ApiClient::new(&config.client)?;
    let scene = load_scene(&client, args.input.as_deref())?;
    write_figure(&scene, args.out.as_deref())
}

/// `kdviz search`: run each search in order.
pub(crate) fn run_search(config: &RunConfig, args: SearchArgs) -> Result<()> {
    let (mut client, mut controller) = controller(config, args.input.as_deref())?;
    let mut failed = 0;
    for raw in &args.ids {
        match controller.submit(raw, &mut client) {
            Ok(Completion::Shown(_) | Completion::Stale) => {}
            Ok(Completion::Failed(_)) | Err(_) => failed += 1,
        }
    }
    write_figure(controller.scatter(), args.out.as_deref())?;
    if failed > 0 {
        return Err(KdvizError::Searches {
            failed,
            total: args.ids.len(),
        });
    }
    Ok(())
}

/// `kdviz interactive`: one search per line of standard input.
pub(crate) fn run_interactive(config: &RunConfig, args: InteractiveArgs) -> Result<()> {
    let (mut client, mut controller) = controller(config, args.input.as_deref())?;
    let out: Option<PathBuf> = args.out;
    eprintln!(
        "Enter an image id (0 to {}), one per line. End input to quit.",
        controller.bounds().max()
    );
    for line in io::stdin().lock().lines() {
        let line = line?;
        let done = controller.handle(InputEvent::KeyUp(Key::Enter), &line, &mut client);
        if matches!(done, Some(Ok(Completion::Shown(_)))) && out.is_some() {
            write_figure(controller.scatter(), out.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdviz_controller::ClientConfig;
    use std::time::Duration;

    fn offline() -> RunConfig {
        RunConfig {
            client: ClientConfig {
                base_url: "http://127.0.0.1:9".into(),
                timeout: Duration::from_secs(1),
                connect_timeout: Duration::from_secs(1),
            },
            max_id: None,
        }
    }

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kdviz-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn tree_from_file_writes_svg() {
        let input = scratch(
            "tree.json",
            r#"{"point":[50,50],"axis":0,"left":null,"right":null}"#,
        );
        let out = input.with_file_name("tree.svg");
        run_tree(
            &offline(),
            OutputArgs {
                input: Some(input),
                out: Some(out.clone()),
            },
        )
        .unwrap();
        let svg = fs::read_to_string(out).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn malformed_tree_is_a_tree_error() {
        let input = scratch("bad-tree.json", r#"{"point":[50,50]}"#);
        let err = run_tree(
            &offline(),
            OutputArgs {
                input: Some(input),
                out: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Could not load tree visualization."));
    }

    #[test]
    fn scatter_from_file_writes_figure() {
        let input = scratch("points.csv", "id,label,x,y,z\n0,0,1,2,3\n1,1,4,5,6\n");
        let out = input.with_file_name("figure.json");
        run_scatter(
            &offline(),
            OutputArgs {
                input: Some(input),
                out: Some(out.clone()),
            },
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(v["data"][0]["x"], serde_json::json!([1.0, 4.0]));
        assert_eq!(v["layout"]["uirevision"], "embedding-scene");
    }

    #[test]
    fn bad_table_is_a_plot_error() {
        let input = scratch("bad.csv", "id,x,y\n0,1,2\n");
        let err = run_scatter(
            &offline(),
            OutputArgs {
                input: Some(input),
                out: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, KdvizError::Plot { .. }));
    }

    #[test]
    fn searches_against_unreachable_server_fail() {
        let input = scratch("search.csv", "id,x,y,z,label\n0,1,2,3,0\n1,4,5,6,1\n");
        let out = input.with_file_name("search.json");
        let err = run_search(
            &offline(),
            SearchArgs {
                input: Some(input),
                out: Some(out.clone()),
                ids: vec!["0".into(), "9".into()],
            },
        )
        .unwrap_err();
        // "9" is outside the dataset-derived bound; "0" cannot reach the server.
        assert!(matches!(err, KdvizError::Searches { failed: 2, total: 2 }));
        // The background figure is still written.
        assert!(fs::read_to_string(out).unwrap().contains("scatter3d"));
    }
}
