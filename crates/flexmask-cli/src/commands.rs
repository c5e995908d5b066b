//! CLI command implementations.

use flexmask_binding::KeypointDictionary;
use flexmask_debug::{inspect_vertex, BindingSnapshot};
use flexmask_deform::{FlexibleMask, MaskConfig};
use flexmask_io::validator::validate_metadata;
use flexmask_io::{
    build_from_metadata_observed, default_tracker_labels, ArTrackingMetadata, Scene,
};
use flexmask_mesh::TriangleMesh;
use flexmask_telemetry::{EventBus, TracingSink};
use flexmask_types::VertexId;

use crate::MaskArgs;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Bind a mesh and write its snapshot.
pub fn bind(args: &MaskArgs, output_path: Option<&str>, verbose: bool) -> CliResult<()> {
    let mask = load_mask(args, verbose)?;
    let snapshot = BindingSnapshot::from_mask(&mask);
    let json = snapshot.to_json()?;

    let bound = mask.bindings().iter().filter(|b| b.is_bound()).count();
    eprintln!(
        "Bound {} of {} vertices to {} keypoints.",
        bound,
        mask.bindings().len(),
        mask.keypoints().len()
    );
    if !mask.omitted_labels().is_empty() {
        eprintln!("Omitted labels: {}", mask.omitted_labels().join(", "));
    }

    match output_path {
        Some(path) => {
            std::fs::write(path, &json)?;
            eprintln!("Snapshot written to: {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print the binding report of one vertex.
pub fn inspect(args: &MaskArgs, vertex: u32, verbose: bool) -> CliResult<()> {
    let mask = load_mask(args, verbose)?;
    let report = inspect_vertex(&mask, VertexId(vertex))?;
    println!("{report}");
    Ok(())
}

/// Validate a config, metadata document, or mesh.
pub fn validate(path: &str) -> CliResult<()> {
    println!("flexmask validator");
    println!("──────────────────");
    println!();

    let content = std::fs::read_to_string(path)?;
    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        MaskConfig::from_toml_str(&content)?;
        println!("✅ Config is valid.");
    } else if path.ends_with(".json") {
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if value.get("ARTRACKING").is_some() {
            println!("Validating AR tracking metadata: {path}");
            let metadata = ArTrackingMetadata::from_json_str(&content)?;
            validate_metadata(&metadata)?;
            let face = metadata.face_experience()?;
            println!(
                "✅ Metadata is valid ({} keypoints on '{}').",
                face.deformed_keypoints.len(),
                face.deformed_id.as_deref().unwrap_or_default()
            );
        } else {
            println!("Validating mesh: {path}");
            let mesh: TriangleMesh = serde_json::from_value(value)?;
            mesh.validate()?;
            println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            );
        }
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (metadata, mesh).".into());
    }

    Ok(())
}

fn load_mask(args: &MaskArgs, verbose: bool) -> CliResult<FlexibleMask> {
    let config = match &args.config {
        Some(path) => MaskConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => MaskConfig::default(),
    };
    let labels: Vec<String> = match &args.labels {
        Some(labels) => labels.clone(),
        None => default_tracker_labels().into_iter().map(String::from).collect(),
    };

    tracing::debug!(input = %args.input, labels = labels.len(), "loading mask inputs");

    let input = std::fs::read_to_string(&args.input)?;
    let value: serde_json::Value = serde_json::from_str(&input)?;
    let is_scene = value.get("nodes").is_some();

    let mut bus = EventBus::new();
    bus.set_enabled(verbose);
    bus.add_sink(Box::new(TracingSink::new()));

    let mask = if let Some(path) = &args.metadata {
        let metadata = ArTrackingMetadata::from_json_str(&std::fs::read_to_string(path)?)?;
        let scene = if is_scene {
            serde_json::from_value(value)?
        } else {
            let name = metadata.face_experience()?.deformed_id.clone().unwrap_or_default();
            Scene::single(name, serde_json::from_value(value)?)
        };
        build_from_metadata_observed(&scene, &metadata, &labels, config, &bus)?
    } else {
        let path = args
            .keypoints
            .as_deref()
            .ok_or("Either --keypoints or --metadata is required")?;
        let dictionary: KeypointDictionary = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let mesh: TriangleMesh = if is_scene {
            let scene: Scene = serde_json::from_value(value)?;
            flexmask_io::extract_geometry(&scene, None)?.clone()
        } else {
            serde_json::from_value(value)?
        };
        FlexibleMask::build_observed(&mesh, &dictionary, &labels, config, &bus)?
    };

    bus.finish();
    Ok(mask)
}
