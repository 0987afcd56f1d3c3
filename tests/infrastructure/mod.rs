mod video;
