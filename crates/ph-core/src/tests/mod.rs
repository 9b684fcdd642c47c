mod sid;
mod timestamp;
