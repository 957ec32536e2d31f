use std::{
    io::Cursor,
    sync::{Arc, Mutex},
    time::Duration,
};

use flume::Sender;
use rodio::{Decoder, OutputStream, Sink, Source};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    audio::{
        config::AudioConfig,
        error::AudioError,
        traits::PlaybackResource,
        util::{construct_sink, format_hint, setup_device_config},
    },
    event::events::Event,
};

/// What the sink currently holds.
#[derive(Default)]
struct Slot {
    generation: u64,
    source: Option<String>,
    clip: Option<Arc<[u8]>>,
    queued: bool,
}

/// rodio-backed [`PlaybackResource`]. Clips are downloaded whole (previews
/// are ~30 s), decoded on a blocking thread and appended to one sink.
pub struct PlaybackEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
    http: reqwest::Client,
    slot: Arc<Mutex<Slot>>,
    loader: Option<JoinHandle<()>>,
    monitor: JoinHandle<()>,
}

impl PlaybackEngine {
    pub fn new(config: &AudioConfig, event_tx: Sender<Event>) -> Result<Self, AudioError> {
        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;
        sink.set_volume(config.volume_ratio());

        let sink = Arc::new(sink);
        let slot = Arc::new(Mutex::new(Slot::default()));
        let monitor = Self::start_monitor(
            sink.clone(),
            slot.clone(),
            event_tx,
            Duration::from_millis(config.monitor_interval_ms.max(10)),
        );

        Ok(Self {
            _stream: stream,
            sink,
            http: reqwest::Client::new(),
            slot,
            loader: None,
            monitor,
        })
    }

    fn start_monitor(
        sink: Arc<Sink>,
        slot: Arc<Mutex<Slot>>,
        event_tx: Sender<Event>,
        interval: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                if let Some(source) = take_drained(&sink, &slot) {
                    debug!(source = source.as_str(), "playback_drained");
                    if event_tx.send(Event::PlaybackFinished(source)).is_err() {
                        break;
                    }
                }
            }
        })
    }

    fn load(&mut self, source: String, generation: u64) {
        let http = self.http.clone();
        let sink = self.sink.clone();
        let slot = self.slot.clone();

        self.loader = Some(tokio::spawn(async move {
            let clip = match fetch_clip(&http, &source).await {
                Ok(clip) => clip,
                Err(e) => {
                    warn!(source = source.as_str(), error = %e, "preview_load_failed");
                    return;
                }
            };

            let queued = tokio::task::spawn_blocking(move || {
                enqueue(&sink, &slot, &source, clip, Some(generation))
            })
            .await;

            if let Ok(Err(e)) = queued {
                warn!(error = %e, "preview_decode_failed");
            }
        }));
    }

    /// Re-queues the cached clip from the start after a natural end.
    fn replay(&mut self) {
        let Some((source, clip)) = replayable(&self.sink, &self.slot) else {
            return;
        };

        let sink = self.sink.clone();
        let slot = self.slot.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = enqueue(&sink, &slot, &source, clip, None) {
                warn!(error = %e, "preview_replay_failed");
            }
        });
    }
}

/// Claims the end of the queued clip. Yields its source once per append;
/// the sink is re-checked under the slot lock so an append racing with
/// this call is never reported as finished.
fn take_drained(sink: &Sink, slot: &Mutex<Slot>) -> Option<String> {
    let mut slot = slot.lock().ok()?;
    if !slot.queued || sink.is_paused() || !sink.empty() {
        return None;
    }
    slot.queued = false;
    slot.source.clone()
}

/// The loaded clip, if it has played out and nothing is queued.
fn replayable(sink: &Sink, slot: &Mutex<Slot>) -> Option<(String, Arc<[u8]>)> {
    let slot = slot.lock().ok()?;
    match (&slot.source, &slot.clip) {
        (Some(source), Some(clip)) if !slot.queued && sink.empty() => {
            Some((source.clone(), clip.clone()))
        }
        _ => None,
    }
}

fn is_current(slot: &Slot, source: &str, generation: Option<u64>) -> bool {
    generation.is_none_or(|g| g == slot.generation) && slot.source.as_deref() == Some(source)
}

async fn fetch_clip(http: &reqwest::Client, source: &str) -> Result<Arc<[u8]>, AudioError> {
    let bytes = http
        .get(source)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    info!(source, bytes = bytes.len(), "preview_fetched");

    Ok(Arc::from(bytes.as_ref()))
}

/// Decodes `clip` and appends it, unless a newer attach happened meanwhile.
/// `generation: None` replays whatever is loaded. Returns whether the clip
/// was queued.
fn enqueue(
    sink: &Sink,
    slot: &Mutex<Slot>,
    source: &str,
    clip: Arc<[u8]>,
    generation: Option<u64>,
) -> Result<bool, AudioError> {
    {
        let slot = slot
            .lock()
            .map_err(|e| AudioError::DeviceError(e.to_string()))?;
        if !is_current(&slot, source, generation) {
            debug!(source, "stale_preview_dropped");
            return Ok(false);
        }
    }

    let byte_len = clip.len() as u64;
    let decoder = Decoder::builder()
        .with_data(Cursor::new(clip.clone()))
        .with_hint(format_hint(source))
        .with_byte_len(byte_len)
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))?;

    commit(sink, slot, source, clip, generation, decoder)
}

/// Appends an already decoded clip. The generation is checked again here
/// since decoding happens outside the lock.
fn commit<S>(
    sink: &Sink,
    slot: &Mutex<Slot>,
    source: &str,
    clip: Arc<[u8]>,
    generation: Option<u64>,
    decoded: S,
) -> Result<bool, AudioError>
where
    S: Source + Send + 'static,
{
    let mut slot = slot
        .lock()
        .map_err(|e| AudioError::DeviceError(e.to_string()))?;
    if !is_current(&slot, source, generation) {
        debug!(source, "stale_preview_dropped");
        return Ok(false);
    }

    sink.append(decoded);
    slot.clip = Some(clip);
    slot.queued = true;
    Ok(true)
}

impl PlaybackResource for PlaybackEngine {
    fn attach(&mut self, source: Option<&str>) {
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        self.sink.stop();

        let generation = match self.slot.lock() {
            Ok(mut slot) => {
                slot.generation += 1;
                slot.source = source.map(str::to_string);
                slot.clip = None;
                slot.queued = false;
                slot.generation
            }
            Err(_) => return,
        };

        if let Some(source) = source {
            self.load(source.to_string(), generation);
        }
    }

    fn play(&mut self) {
        self.sink.play();
        self.replay();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.monitor.abort();
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        self.sink.stop();
    }
}

#[cfg(test)]
mod tests {
    use rodio::queue::SourcesQueueOutput;

    use super::*;

    const SRC: &str = "http://x/1.m4a";

    /// A few samples of silence.
    struct Blip(usize);

    impl Iterator for Blip {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            if self.0 == 0 {
                return None;
            }
            self.0 -= 1;
            Some(0.0)
        }
    }

    impl Source for Blip {
        fn current_span_len(&self) -> Option<usize> {
            Some(self.0)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            44_100
        }

        fn total_duration(&self) -> Option<Duration> {
            None
        }
    }

    fn attached(generation: u64) -> Mutex<Slot> {
        Mutex::new(Slot {
            generation,
            source: Some(SRC.to_string()),
            ..Slot::default()
        })
    }

    fn clip() -> Arc<[u8]> {
        Arc::from(&b"not really audio"[..])
    }

    fn drain(output: &mut SourcesQueueOutput) {
        for _ in output.by_ref().take(256) {}
    }

    #[test]
    fn superseded_generation_appends_nothing() {
        let (sink, _output) = Sink::new();
        let slot = attached(2);

        assert!(!enqueue(&sink, &slot, SRC, clip(), Some(1)).unwrap());
        assert!(!commit(&sink, &slot, SRC, clip(), Some(1), Blip(4)).unwrap());
        assert!(!commit(&sink, &slot, "http://x/other.m4a", clip(), Some(2), Blip(4)).unwrap());

        assert!(sink.empty());
        let slot = slot.lock().unwrap();
        assert!(!slot.queued);
        assert!(slot.clip.is_none());
    }

    #[test]
    fn current_generation_is_decoded_and_queued() {
        let (sink, _output) = Sink::new();
        let slot = attached(2);

        assert!(matches!(
            enqueue(&sink, &slot, SRC, clip(), Some(2)),
            Err(AudioError::DecodingError(_))
        ));
        assert!(sink.empty());

        assert!(commit(&sink, &slot, SRC, clip(), Some(2), Blip(4)).unwrap());
        assert_eq!(sink.len(), 1);
        assert!(slot.lock().unwrap().queued);
    }

    #[test]
    fn drained_clip_finishes_exactly_once() {
        let (sink, mut output) = Sink::new();
        let slot = attached(1);
        commit(&sink, &slot, SRC, clip(), Some(1), Blip(4)).unwrap();

        drain(&mut output);
        assert!(sink.empty());
        assert_eq!(take_drained(&sink, &slot), Some(SRC.to_string()));
        assert_eq!(take_drained(&sink, &slot), None);
    }

    #[test]
    fn clip_still_in_the_sink_is_not_finished() {
        let (sink, mut output) = Sink::new();
        let slot = attached(1);

        // Queued flag set while the sink still holds the clip.
        commit(&sink, &slot, SRC, clip(), Some(1), Blip(4)).unwrap();
        assert_eq!(take_drained(&sink, &slot), None);

        drain(&mut output);
        sink.pause();
        assert_eq!(take_drained(&sink, &slot), None);

        sink.play();
        assert_eq!(take_drained(&sink, &slot), Some(SRC.to_string()));
    }

    #[test]
    fn only_a_played_out_clip_is_replayed() {
        let (sink, mut output) = Sink::new();
        let slot = attached(1);
        assert!(replayable(&sink, &slot).is_none());

        commit(&sink, &slot, SRC, clip(), Some(1), Blip(4)).unwrap();
        assert!(replayable(&sink, &slot).is_none());

        drain(&mut output);
        take_drained(&sink, &slot);
        let (source, cached) = replayable(&sink, &slot).unwrap();
        assert_eq!(source, SRC);
        assert_eq!(&cached[..], &clip()[..]);

        assert!(commit(&sink, &slot, &source, cached, None, Blip(4)).unwrap());
        assert_eq!(sink.len(), 1);
        assert!(replayable(&sink, &slot).is_none());
    }
}
