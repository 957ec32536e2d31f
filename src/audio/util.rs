use std::path::Path;

use rodio::{
    Device, DeviceTrait, OutputStream, OutputStreamBuilder, Sink,
    cpal::{
        BufferSize, SampleFormat, SampleRate, StreamConfig, default_host, traits::HostTrait,
    },
};

use crate::audio::error::AudioError;

const FALLBACK_SAMPLE_RATE: u32 = 44_100;

pub fn setup_device_config() -> Result<(Device, StreamConfig, SampleFormat), AudioError> {
    let device = default_host()
        .default_output_device()
        .ok_or_else(|| AudioError::DeviceError("no default output device".to_string()))?;

    // Previews are 44.1 kHz AAC; prefer a config that can run at that rate.
    let preferred = device.supported_output_configs().ok().and_then(|configs| {
        configs
            .filter(|cfg| {
                (cfg.min_sample_rate().0..=cfg.max_sample_rate().0).contains(&FALLBACK_SAMPLE_RATE)
            })
            .max_by_key(|cfg| cfg.channels())
    });

    let (config, sample_format) = match preferred {
        Some(cfg) => (
            StreamConfig {
                channels: cfg.channels(),
                sample_rate: SampleRate(FALLBACK_SAMPLE_RATE),
                buffer_size: BufferSize::Default,
            },
            cfg.sample_format(),
        ),
        None => (
            StreamConfig {
                channels: 2,
                sample_rate: SampleRate(FALLBACK_SAMPLE_RATE),
                buffer_size: BufferSize::Default,
            },
            SampleFormat::F32,
        ),
    };

    Ok((device, config, sample_format))
}

pub fn construct_sink(
    device: Device,
    config: &StreamConfig,
    sample_format: SampleFormat,
) -> Result<(OutputStream, Sink), AudioError> {
    let stream = OutputStreamBuilder::default()
        .with_buffer_size(config.buffer_size)
        .with_sample_rate(config.sample_rate.0)
        .with_device(device)
        .with_sample_format(sample_format)
        .open_stream_or_fallback()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    let sink = Sink::connect_new(stream.mixer());

    Ok((stream, sink))
}

/// Container hint for the decoder, taken from the clip URL's extension.
pub fn format_hint(source: &str) -> &'static str {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mp3") => "mp3",
        Some(ext) if ext.eq_ignore_ascii_case("aac") => "aac",
        Some(ext) if ext.eq_ignore_ascii_case("mp4") => "mp4",
        _ => "m4a",
    }
}
