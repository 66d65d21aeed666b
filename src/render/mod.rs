//! Layered SVG rendering of a downsampled waveform.

/// Perceptual colormaps for the segment gradient.
pub mod colormap;
/// The shadow / glow / highlight / main / edge pass stack.
pub mod layers;
/// PNG preview rasterization.
pub mod raster;
/// Append-only SVG drawing surface.
pub mod surface;
/// Series-to-surface rendering and the parallel main pass.
pub mod waveform;
