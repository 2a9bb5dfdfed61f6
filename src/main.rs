use clap::Parser;
use clicktrack::{
    audio::{self, ClickSink, CueBank, LogSink},
    cli::{validate_device, Args},
    config::{default_config_path, Settings},
    create_shared_state,
    event_loop::TransportAction,
    logging,
    tui::run_tui_event_loop,
    ui::HeadlessUi,
    Cue, EngineMessage, EventLoop, Metronome, ThreadScheduler,
};
use std::sync::Arc;
use std::thread;

fn main() {
    initialize_logging();
    let args = Args::parse();

    if args.device_list {
        list_available_devices(&audio::output_devices());
        return;
    }

    let mut settings = load_settings(&args);
    if args.choose_device {
        settings.output_device = choose_output_device();
    }

    if let Some(device_name) = &settings.output_device {
        if let Err(error_msg) = validate_device(device_name, &audio::output_devices()) {
            fail(&error_msg);
        }
    }

    // Cues are decoded once here and shared read-only from then on.
    let cues = match CueBank::load(
        settings.accent_sample.as_deref(),
        settings.regular_sample.as_deref(),
    ) {
        Ok(cues) => Arc::new(cues.with_volume(settings.volume)),
        Err(e) => fail(&e.to_string()),
    };
    log::debug!(
        "Cues ready: accent {:.3}s, regular {:.3}s, volume {}",
        cues.sound(Cue::Accent).duration_secs(),
        cues.sound(Cue::Regular).duration_secs(),
        cues.volume()
    );

    #[cfg(feature = "audio")]
    let output = if settings.mute {
        None
    } else {
        match audio::AudioOutput::open(settings.output_device.as_deref()) {
            Ok(output) => Some(output),
            Err(e) => fail(&e.to_string()),
        }
    };

    #[cfg(feature = "audio")]
    let sink: Box<dyn ClickSink> = match &output {
        Some(output) => Box::new(output.sink(Arc::clone(&cues))),
        None => Box::new(LogSink),
    };
    #[cfg(not(feature = "audio"))]
    let sink: Box<dyn ClickSink> = {
        log::warn!("Built without audio support, clicks are only logged");
        Box::new(LogSink)
    };

    let (message_tx, message_rx) = crossbeam::channel::unbounded();
    let shared_state = create_shared_state(settings.tempo);
    let metronome = Metronome::new(
        settings.tempo,
        ThreadScheduler::new(message_tx.clone()),
        sink,
    );
    let event_loop = EventLoop::new(metronome, message_rx, shared_state.clone());
    let engine = thread::spawn(move || {
        event_loop.run();
    });

    if args.headless {
        log::info!("Running headless at {}", settings.tempo);
        let _ = message_tx.send(EngineMessage::TransportCommand(TransportAction::Start));
        HeadlessUi::new(shared_state).run();
    } else if let Err(e) = run_tui_event_loop(shared_state, message_tx.clone()) {
        log::error!("Terminal UI error: {}", e);
        eprintln!("Terminal UI error: {}", e);
    }

    let _ = message_tx.send(EngineMessage::Quit);
    if engine.join().is_err() {
        log::error!("Event loop thread panicked");
    }
    log::info!("Application exiting");
}

fn initialize_logging() {
    if let Err(e) = logging::init_logger() {
        eprintln!("Logger initialization failed: {}", e);
    }
    log::info!("Application starting");
}

fn load_settings(args: &Args) -> Settings {
    let config_file = args.config.clone().or_else(default_config_path);
    match Settings::load(config_file.as_deref()) {
        Ok(settings) => settings.apply_args(args),
        Err(e) => fail(&e.to_string()),
    }
}

fn list_available_devices(devices: &[String]) {
    println!("Available audio output devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

fn choose_output_device() -> Option<String> {
    let devices = audio::output_devices();
    if devices.is_empty() {
        log::warn!("No output devices to choose from, using the default");
        return None;
    }
    match dialoguer::Select::new()
        .with_prompt("Audio output device")
        .items(&devices)
        .default(0)
        .interact_opt()
    {
        Ok(Some(index)) => Some(devices[index].clone()),
        Ok(None) => None,
        Err(e) => fail(&format!("Device selection failed: {}", e)),
    }
}

fn fail(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    std::process::exit(1);
}
