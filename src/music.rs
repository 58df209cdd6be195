//! Background music state.
//!
//! Autoplay rules mean the track can only start from a user interaction:
//! the first click anywhere starts playback unmuted, after which the volume
//! button toggles mute. The track loops, and playback resumes when the tab
//! regains visibility. Actual audio output goes through [`AudioSink`],
//! implemented by the shell around its audio element.

const DEFAULT_VOLUME: f64 = 0.3;

/// The shell's audio element.
pub trait AudioSink {
    /// Starts playback. Returns `false` when the environment refuses
    /// (autoplay policy, missing source).
    fn play(&mut self) -> bool;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_looping(&mut self, looping: bool);
}

/// App-scoped playback state machine.
pub struct MusicContext {
    started: bool,
    muted: bool,
    playing: bool,
}

impl Default for MusicContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicContext {
    /// Muted and idle until the first interaction.
    pub fn new() -> Self {
        Self {
            started: false,
            muted: true,
            playing: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The volume button glyph for the current state.
    pub fn icon(&self) -> &'static str {
        if !self.started || self.muted { "🔇" } else { "🔊" }
    }

    fn start(&mut self, sink: &mut dyn AudioSink) {
        sink.set_volume(DEFAULT_VOLUME);
        sink.set_muted(self.muted);
        sink.set_looping(true);
        self.playing = sink.play();
        if !self.playing {
            log::error!("music playback refused by the environment");
        }
    }

    /// First click anywhere on the page starts the track unmuted. Later
    /// interactions do nothing; mute state belongs to the volume button.
    pub fn handle_interaction(&mut self, sink: &mut dyn AudioSink) {
        if self.started {
            return;
        }
        self.started = true;
        self.muted = false;
        self.start(sink);
    }

    /// Starts playback directly, e.g. when the puzzle unlocks the track.
    pub fn play(&mut self, sink: &mut dyn AudioSink) {
        self.started = true;
        self.muted = false;
        self.start(sink);
    }

    /// Mute toggling is only live once playback has started.
    pub fn toggle_mute(&mut self, sink: &mut dyn AudioSink) {
        if !self.started {
            return;
        }
        self.muted = !self.muted;
        sink.set_muted(self.muted);
    }

    /// The sink reported a pause; restart unless the user muted.
    pub fn on_paused(&mut self, sink: &mut dyn AudioSink) {
        self.playing = false;
        if self.started && !self.muted {
            self.start(sink);
        }
    }

    /// The track ran out; loop it.
    pub fn on_ended(&mut self, sink: &mut dyn AudioSink) {
        self.playing = false;
        if self.started && !self.muted {
            self.start(sink);
        }
    }

    /// The tab became visible again; resume if playback should be running.
    pub fn on_visibility_regained(&mut self, sink: &mut dyn AudioSink) {
        if self.started && !self.muted && !self.playing {
            self.start(sink);
        }
    }
}
