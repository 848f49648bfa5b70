use std::{fs, io::Cursor, thread};

use rodio::{Decoder, OutputStreamBuilder, Sink};

use crate::core::KanaflashError;

/// Play a card's audio asset in the background. Fire-and-forget: the thread
/// fetches, decodes and plays on its own, and a failure is logged without
/// touching session state.
pub fn play_card_audio(url: String) {
    thread::spawn(move || {
        if let Err(e) = play(&url) {
            eprintln!("[Audio] Playback failed for {}: {}", url, e);
        }
    });
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>, KanaflashError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let response = reqwest::blocking::get(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(KanaflashError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body: String::new(),
            });
        }
        Ok(response.bytes()?.to_vec())
    } else {
        Ok(fs::read(url)?)
    }
}

fn play(url: &str) -> Result<(), KanaflashError> {
    let bytes = fetch_bytes(url)?;

    let stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| KanaflashError::Audio(e.to_string()))?;
    let sink = Sink::connect_new(stream.mixer());

    let decoder =
        Decoder::new(Cursor::new(bytes)).map_err(|e| KanaflashError::Audio(e.to_string()))?;
    sink.append(decoder);

    // The stream lives on this thread's stack; block until playback is done.
    sink.sleep_until_end();
    Ok(())
}
