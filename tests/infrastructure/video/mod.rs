mod onnx_face_detector_test;
mod resnext_lstm_test;
