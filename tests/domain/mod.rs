mod audio_format_test;
mod calibration_test;
mod frame_sequence_test;
