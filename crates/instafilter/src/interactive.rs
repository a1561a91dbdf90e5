//! Line-oriented session: read commands, apply them, print the state.
//!
//! This plays the part of the display surface. After every command it
//! prints the title, the status line, the current settings, and what
//! preview would be on screen.

use std::io::{self, BufRead, Write};

use instafilter_core::{FilterBackend, FilterKind, ImagePersister, RgbaImage, Session};
use instafilter_io::load_image;

use crate::command::{Command, HELP};

/// Run commands from `input` until `quit` or end of input.
///
/// Pending saves are waited for before returning.
pub fn run<B, P>(
    session: &mut Session<B, P>,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()>
where
    B: FilterBackend<Image = RgbaImage>,
    P: ImagePersister<RgbaImage>,
{
    write_view(out, session)?;
    for line in input.lines() {
        let line = line?;
        session.poll_saves();

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(crate::command::CommandError::Empty) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        match command {
            Command::Open(path) => match load_image(&path) {
                Ok(image) => {
                    session.select_image(image).ok();
                }
                Err(e) => {
                    log::warn!("{e}");
                    writeln!(out, "error: {e}")?;
                    continue;
                }
            },
            Command::Filter(kind) => {
                session.change_filter(kind).ok();
            }
            Command::Intensity(value) => {
                session.change_intensity(value).ok();
            }
            Command::Save => {
                session.save().ok();
            }
            Command::Status => {}
            Command::Filters => {
                write_filters(out)?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }
        write_view(out, session)?;
    }

    if session.pending_saves() > 0 {
        session.wait_for_saves();
        write_view(out, session)?;
    }
    Ok(())
}

/// Print what a screen would show.
pub fn write_view<B, P>(out: &mut impl Write, session: &Session<B, P>) -> io::Result<()>
where
    B: FilterBackend<Image = RgbaImage>,
{
    writeln!(out, "== {} ==", session.title())?;

    let status = session.status();
    if status.is_error {
        writeln!(out, "error: {}", status.message)?;
    } else {
        writeln!(out, "{}", status.message)?;
    }

    writeln!(
        out,
        "filter: {}  intensity: {:.2}  parameters: {}",
        session.filter().id(),
        session.intensity(),
        session.assignment(),
    )?;

    match session.displayed_image() {
        Some(image) => {
            let stale = if session.rendered_image().is_none() {
                " (stale)"
            } else {
                ""
            };
            writeln!(out, "preview: {}x{}{stale}", image.width(), image.height())
        }
        None => writeln!(out, "preview: none"),
    }
}

fn write_filters(out: &mut impl Write) -> io::Result<()> {
    for kind in FilterKind::ALL {
        let capability = kind.capability();
        let params = capability
            .accepted_parameters()
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>();
        let params = if params.is_empty() {
            "no parameters".to_owned()
        } else {
            params.join(", ")
        };
        writeln!(
            out,
            "{:<14} {:<14} {params}",
            capability.id(),
            capability.display_name()
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgba;
    use instafilter_core::{ImageprocBackend, SessionConfig};
    use instafilter_io::PhotoLibrary;

    use super::*;

    fn run_script(script: &str, library: &PhotoLibrary) -> String {
        let mut session = Session::new(ImageprocBackend, library, &SessionConfig::default());
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn save_without_photo_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = PhotoLibrary::new(dir.path());
        let out = run_script("save\nquit\n", &library);
        assert!(out.contains("error: Please select a photo before saving"), "{out}");
        assert!(!dir.path().join("anything").exists());
    }

    #[test]
    fn open_filter_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        RgbaImage::from_pixel(6, 4, Rgba([120, 60, 30, 255]))
            .save(&photo)
            .unwrap();
        let library_dir = dir.path().join("library");
        let library = PhotoLibrary::new(&library_dir);

        let script = format!(
            "open {}\nfilter gaussian-blur\nintensity 1\nsave\n",
            photo.display()
        );
        let out = run_script(&script, &library);

        assert!(out.contains("== Gaussian Blur =="), "{out}");
        assert!(out.contains("parameters: {radius: 200}"), "{out}");
        assert!(out.contains("preview: 6x4"), "{out}");
        assert!(out.contains("Saved to "), "{out}");
        assert_eq!(std::fs::read_dir(&library_dir).unwrap().count(), 1);
    }

    #[test]
    fn bad_lines_do_not_end_session() {
        let dir = tempfile::tempdir().unwrap();
        let library = PhotoLibrary::new(dir.path());
        let out = run_script(
            "wat\nopen /definitely/missing.png\nfilter edges\nstatus\n",
            &library,
        );
        assert!(out.contains("unknown command \"wat\""), "{out}");
        assert!(out.contains("error: cannot read /definitely/missing.png"), "{out}");
        assert!(out.contains("== Edges =="), "{out}");
        assert!(out.contains("parameters: {}"), "{out}");
    }

    #[test]
    fn filters_lists_parameters() {
        let mut out = Vec::new();
        write_filters(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("edges"));
        assert!(text.contains("no parameters"));
        assert!(text.contains("gaussianBlur"));
        assert!(text.contains("radius"));
    }
}
