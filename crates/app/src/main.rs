//! Entry point for Baublelit.
//! Logging + CLI flags + mesh preparation, then hands off to the platform loop.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{mesh::MeshData, palette::HeightBands};
use platform::RunConfig;

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_show_fps_arg(args: &[String]) -> bool {
    // --show-fps[=on|off], off by default
    for arg in args {
        if arg == "--show-fps" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--show-fps=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(1280).max(1);
    let hh = h.unwrap_or(720).max(1);
    (ww, hh)
}

fn parse_mesh_arg(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .rev()
        .find_map(|arg| arg.strip_prefix("--mesh="))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// The `--mesh` file when given, the embedded decorations otherwise.
fn load_mesh(path: Option<&Path>, bands: &HeightBands) -> Result<MeshData> {
    match path {
        Some(path) => asset::prepare_mesh_from_path(path, bands),
        None => asset::prepare_mesh(asset::DECORATIONS_OBJ, bands)
            .context("Embedded decorations mesh is broken"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (width, height) = parse_size_args(&args);
    let config = RunConfig {
        backends: parse_backend_arg(&args),
        width,
        height,
        show_fps: parse_show_fps_arg(&args),
    };
    let mesh_path = parse_mesh_arg(&args);
    log::info!(
        "Starting Baublelit. Backend: {:?}, show_fps={}, window_size={}x{}, mesh={}",
        config.backends,
        config.show_fps,
        width,
        height,
        mesh_path
            .as_deref()
            .map_or_else(|| "<embedded>".to_owned(), |p| p.display().to_string())
    );

    let mesh = load_mesh(mesh_path.as_deref(), &HeightBands::default())?;

    platform::run(config, mesh)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn backend_flag_selects_backend() {
        assert_eq!(parse_backend_arg(&args(&[])), wgpu::Backends::all());
        assert_eq!(
            parse_backend_arg(&args(&["--gpu-backend=VK"])),
            wgpu::Backends::VULKAN
        );
        assert_eq!(
            parse_backend_arg(&args(&["--gpu-backend=gl", "--gpu-backend=bogus"])),
            wgpu::Backends::all()
        );
    }

    #[test]
    fn show_fps_flag_forms() {
        assert!(parse_show_fps_arg(&args(&["--show-fps"])));
        assert!(parse_show_fps_arg(&args(&["--show-fps=on"])));
        assert!(!parse_show_fps_arg(&args(&["--show-fps=off"])));
        assert!(!parse_show_fps_arg(&args(&[])));
    }

    #[test]
    fn size_flags_and_defaults() {
        assert_eq!(parse_size_args(&args(&[])), (1280, 720));
        assert_eq!(parse_size_args(&args(&["--size=800x600"])), (800, 600));
        assert_eq!(parse_size_args(&args(&["--width=0", "--height=300"])), (1, 300));
        assert_eq!(parse_size_args(&args(&["--size=axb"])), (1280, 720));
    }

    #[test]
    fn mesh_flag_uses_last_non_empty_value() {
        assert_eq!(parse_mesh_arg(&args(&[])), None);
        assert_eq!(parse_mesh_arg(&args(&["--mesh="])), None);
        assert_eq!(
            parse_mesh_arg(&args(&["--mesh=a.obj", "--mesh=b.obj"])),
            Some(PathBuf::from("b.obj"))
        );
    }

    #[test]
    fn embedded_mesh_is_default_source() {
        let bands = HeightBands::default();
        let mesh = load_mesh(None, &bands).unwrap();
        assert_eq!(mesh.triangle_count(), 24);

        let asset_file =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../asset/assets/decorations.obj");
        assert_eq!(load_mesh(Some(asset_file.as_path()), &bands).unwrap(), mesh);
        assert!(load_mesh(Some(Path::new("/nonexistent/mesh.obj")), &bands).is_err());
    }
}
